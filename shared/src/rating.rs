//! Rating aggregation
//!
//! Turns per-attribute slider scores and bonus/penalty tags into a base
//! rating on a 0-4.5 scale and a final 0-5 rating.

use std::collections::BTreeMap;

use crate::config::RatingCalibration;
use crate::models::{
    profile_for, AttributeKey, AttributeScore, BeverageCategory, BonusAttribute, CategoryProfile,
    RatingInput, RatingResult,
};
use crate::types::{clamp, round2};

/// Aggregates ratings for one category profile
#[derive(Debug, Clone, Copy)]
pub struct RatingAggregator<'a> {
    profile: &'a CategoryProfile,
    calibration: RatingCalibration,
}

impl<'a> RatingAggregator<'a> {
    pub fn new(profile: &'a CategoryProfile) -> Self {
        Self::with_calibration(profile, RatingCalibration::default())
    }

    pub fn with_calibration(profile: &'a CategoryProfile, calibration: RatingCalibration) -> Self {
        Self {
            profile,
            calibration,
        }
    }

    /// Unrounded base rating on the 0 to `base_rating_ceiling` scale.
    ///
    /// Unrated attributes are skipped entirely, so the average is taken only
    /// over what the user actually rated.
    pub fn base_rating(&self, attributes: &BTreeMap<AttributeKey, AttributeScore>) -> f64 {
        let min_score = f64::from(self.calibration.min_score);
        let score_span = f64::from(self.calibration.max_score) - min_score;
        let max_weight_sum = self.profile.max_weight_sum;

        let mut total_weighted_score = 0.0;
        let mut total_weight = 0.0;
        for (attribute, entry) in attributes {
            let Some(score) = entry.rated_score() else {
                continue;
            };
            let weight = entry
                .weight
                .unwrap_or_else(|| self.profile.default_weight(*attribute));
            let score_ratio = (f64::from(score) - min_score) / score_span;

            total_weighted_score += score_ratio * weight;
            total_weight += weight;
        }

        // All rated attributes may carry weight 0
        let on_max_scale = if total_weight > 0.0 {
            (total_weighted_score / total_weight) * max_weight_sum
        } else {
            0.0
        };
        let base = if max_weight_sum > 0.0 {
            (on_max_scale / max_weight_sum) * self.calibration.base_rating_ceiling
        } else {
            0.0
        };

        tracing::debug!(
            category = %self.profile.category,
            total_weighted_score,
            total_weight,
            base,
            "Aggregated attribute scores"
        );
        base
    }

    /// Unrounded bonus points, clamped to the bonus cap.
    ///
    /// An override is applied whenever it is present, including an explicit 0.
    pub fn bonus_points(&self, bonuses: &[BonusAttribute], user_bonus_override: Option<f64>) -> f64 {
        let cap = self.calibration.bonus_cap;
        let raw = match user_bonus_override.filter(|v| v.is_finite()) {
            Some(value) => value,
            None => bonuses.iter().map(|b| b.weight).filter(|w| w.is_finite()).sum(),
        };
        clamp(raw, -cap, cap)
    }

    /// Compute the rounded rating result
    pub fn aggregate(
        &self,
        attributes: &BTreeMap<AttributeKey, AttributeScore>,
        bonuses: &[BonusAttribute],
        user_bonus_override: Option<f64>,
        hide_bonus: bool,
    ) -> RatingResult {
        let base_rating = self.base_rating(attributes);
        let bonus_points = self.bonus_points(bonuses, user_bonus_override);
        let applied = if hide_bonus { 0.0 } else { bonus_points };
        let final_rating = clamp(
            base_rating + applied,
            0.0,
            self.calibration.final_rating_ceiling,
        );

        RatingResult {
            base_rating: round2(base_rating),
            bonus_points: round2(bonus_points),
            final_rating: round2(final_rating),
            hide_bonus,
        }
    }

    pub fn rate(&self, input: &RatingInput) -> RatingResult {
        self.aggregate(
            &input.attributes,
            &input.bonus_attributes,
            input.user_bonus_override,
            input.hide_bonus,
        )
    }
}

/// Calculate a final rating using the built-in profile for `category`
pub fn calculate_final_rating(
    main_attributes: &BTreeMap<AttributeKey, AttributeScore>,
    bonus_attributes: &[BonusAttribute],
    user_bonus_override: Option<f64>,
    hide_bonus: bool,
    category: BeverageCategory,
) -> RatingResult {
    RatingAggregator::new(profile_for(category)).aggregate(
        main_attributes,
        bonus_attributes,
        user_bonus_override,
        hide_bonus,
    )
}

/// Calculate a final rating from a collected rating input
pub fn rate(input: &RatingInput) -> RatingResult {
    RatingAggregator::new(profile_for(input.category)).rate(input)
}
