//! Per-category weight settings
//!
//! Storage is abstracted behind [`SettingsRepository`]; the UI layer supplies
//! its own implementation. [`SettingsManager`] validates saves and resolves
//! effective weights before calling the pure aggregator.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, RatingCalibration};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttributeWeights, BeverageCategory, CategoryProfile, ProfileTable, RatingInput, RatingResult,
};
use crate::rating::RatingAggregator;
use crate::validation::{validate_weights, WeightValidationResult};

/// User settings for one category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategorySettings {
    pub weights: AttributeWeights,
    #[serde(default)]
    pub hide_bonus: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CategorySettings {
    /// Settings equal to the profile defaults
    pub fn defaults_for(profile: &CategoryProfile) -> Self {
        Self {
            weights: profile.default_weights.clone(),
            hide_bonus: false,
            updated_at: None,
        }
    }
}

/// Storage capability for category settings
pub trait SettingsRepository: Send + Sync {
    /// Stored settings, or the category defaults when nothing was saved
    fn get(&self, category: BeverageCategory) -> CategorySettings;

    /// Persist settings; returns whether the write succeeded
    fn save(&self, category: BeverageCategory, settings: CategorySettings) -> bool;
}

/// Process-local settings store
#[derive(Debug, Default)]
pub struct InMemorySettingsRepository {
    profiles: ProfileTable,
    entries: RwLock<HashMap<BeverageCategory, CategorySettings>>,
}

impl InMemorySettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: ProfileTable) -> Self {
        Self {
            profiles,
            entries: RwLock::default(),
        }
    }
}

impl SettingsRepository for InMemorySettingsRepository {
    fn get(&self, category: BeverageCategory) -> CategorySettings {
        let stored = match self.entries.read() {
            Ok(entries) => entries.get(&category).cloned(),
            Err(_) => {
                tracing::warn!(category = %category, "settings lock poisoned, using defaults");
                None
            }
        };
        stored.unwrap_or_else(|| CategorySettings::defaults_for(self.profiles.get(category)))
    }

    fn save(&self, category: BeverageCategory, settings: CategorySettings) -> bool {
        match self.entries.write() {
            Ok(mut entries) => {
                entries.insert(category, settings);
                true
            }
            Err(_) => false,
        }
    }
}

/// Caller-side coordinator between settings storage and the rating engine
pub struct SettingsManager<R: SettingsRepository> {
    repository: R,
    profiles: ProfileTable,
    calibration: RatingCalibration,
}

impl<R: SettingsRepository> SettingsManager<R> {
    /// Manager over the built-in profiles and calibration
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            profiles: ProfileTable::builtin(),
            calibration: RatingCalibration::default(),
        }
    }

    /// Manager over configured profiles and calibration
    pub fn from_config(repository: R, config: &EngineConfig) -> EngineResult<Self> {
        Ok(Self {
            repository,
            profiles: config.profile_table()?,
            calibration: config.rating,
        })
    }

    pub fn profile(&self, category: BeverageCategory) -> &CategoryProfile {
        self.profiles.get(category)
    }

    pub fn settings(&self, category: BeverageCategory) -> CategorySettings {
        self.repository.get(category)
    }

    /// Validate weights against the category ceiling without saving
    pub fn validate(
        &self,
        category: BeverageCategory,
        weights: &AttributeWeights,
    ) -> WeightValidationResult {
        validate_weights(weights, self.profile(category).max_weight_sum)
    }

    /// Validate and persist new weights for a category. The saved map
    /// replaces any earlier one and is checked the way rating will use it,
    /// overlaid on the profile defaults.
    pub fn save_weights(
        &self,
        category: BeverageCategory,
        weights: AttributeWeights,
    ) -> EngineResult<WeightValidationResult> {
        let profile = self.profile(category);
        if let Some(attribute) = weights.keys().find(|a| !profile.has_attribute(*a)) {
            return Err(EngineError::AttributeNotInProfile { category, attribute });
        }

        let validation = validate_weights(
            &overlay_defaults(profile, &weights),
            profile.max_weight_sum,
        );
        if !validation.is_valid {
            tracing::warn!(
                category = %category,
                sum = validation.sum,
                max_sum = validation.max_sum,
                exceeds_max = validation.errors.exceeds_max,
                invalid_range = validation.errors.invalid_range,
                "Rejected weight settings"
            );
            return Err(EngineError::InvalidWeights {
                sum: validation.sum,
                max_sum: validation.max_sum,
                exceeds_max: validation.errors.exceeds_max,
                invalid_range: validation.errors.invalid_range,
            });
        }

        let settings = CategorySettings {
            weights,
            updated_at: Some(Utc::now()),
            ..self.repository.get(category)
        };
        self.store(category, settings)?;
        Ok(validation)
    }

    /// Persist the hide-bonus preference for a category
    pub fn set_hide_bonus(&self, category: BeverageCategory, hide_bonus: bool) -> EngineResult<()> {
        let settings = CategorySettings {
            hide_bonus,
            updated_at: Some(Utc::now()),
            ..self.repository.get(category)
        };
        self.store(category, settings)
    }

    /// Restore a category to its profile defaults
    pub fn reset(&self, category: BeverageCategory) -> EngineResult<CategorySettings> {
        let settings = CategorySettings::defaults_for(self.profile(category));
        self.store(category, settings.clone())?;
        Ok(settings)
    }

    /// Profile defaults overlaid with saved weights
    pub fn effective_weights(&self, category: BeverageCategory) -> AttributeWeights {
        overlay_defaults(
            self.profile(category),
            &self.repository.get(category).weights,
        )
    }

    /// Rate using the saved weights and hide-bonus preference.
    /// Weights supplied explicitly on an attribute still win.
    pub fn rate(&self, input: &RatingInput) -> RatingResult {
        let settings = self.repository.get(input.category);
        let weights = self.effective_weights(input.category);

        let mut attributes = input.attributes.clone();
        for (attribute, entry) in attributes.iter_mut() {
            if entry.weight.is_none() {
                entry.weight = Some(weights.get(*attribute).unwrap_or(0.0));
            }
        }

        RatingAggregator::with_calibration(self.profile(input.category), self.calibration).aggregate(
            &attributes,
            &input.bonus_attributes,
            input.user_bonus_override,
            input.hide_bonus || settings.hide_bonus,
        )
    }

    fn store(&self, category: BeverageCategory, settings: CategorySettings) -> EngineResult<()> {
        if self.repository.save(category, settings) {
            Ok(())
        } else {
            Err(EngineError::Storage(format!(
                "failed to save settings for {}",
                category
            )))
        }
    }
}

fn overlay_defaults(profile: &CategoryProfile, weights: &AttributeWeights) -> AttributeWeights {
    let mut merged = profile.default_weights.clone();
    for (attribute, weight) in weights.iter() {
        merged.insert(attribute, weight);
    }
    merged
}
