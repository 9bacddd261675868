//! Rating session models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::beverage::{AttributeKey, BeverageCategory};
use super::bonus::BonusAttribute;

/// Slider score for one attribute
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributeScore {
    /// 1 (worst) to 7 (best). `None` or 0 means not yet rated.
    pub score: Option<u8>,
    /// Explicit weight; falls back to the category default when absent
    pub weight: Option<f64>,
}

impl AttributeScore {
    pub fn new(score: u8) -> Self {
        Self {
            score: Some(score),
            weight: None,
        }
    }

    pub fn weighted(score: u8, weight: f64) -> Self {
        Self {
            score: Some(score),
            weight: Some(weight),
        }
    }

    /// Score when the attribute has been rated
    pub fn rated_score(&self) -> Option<u8> {
        self.score.filter(|s| *s > 0)
    }
}

/// Everything the UI collects for one rating
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RatingInput {
    pub category: BeverageCategory,
    pub attributes: BTreeMap<AttributeKey, AttributeScore>,
    pub bonus_attributes: Vec<BonusAttribute>,
    pub user_bonus_override: Option<f64>,
    pub hide_bonus: bool,
}

/// Computed rating, rounded to 2 decimal places
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatingResult {
    /// 0 to 4.5
    pub base_rating: f64,
    /// -0.5 to 0.5. Still reported when hidden so the UI can show the
    /// would-be bonus.
    pub bonus_points: f64,
    /// 0 to 5
    pub final_rating: f64,
    pub hide_bonus: bool,
}

impl RatingResult {
    /// Bonus actually folded into the final rating
    pub fn applied_bonus(&self) -> f64 {
        if self.hide_bonus {
            0.0
        } else {
            self.bonus_points
        }
    }
}
