//! Calibration configuration for the rating engine
//!
//! Supports hierarchical configuration loading:
//! 1. Built-in calibration constants
//! 2. An optional TOML file (`config/pourfolio.toml` unless a path is given)
//! 3. Environment variable overrides with the POURFOLIO prefix, e.g.
//!    `POURFOLIO__PRICING__MAX_EXPECTED_COMPOSITE=6000`

use std::collections::BTreeMap;
use std::path::Path;

use ::config::{Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttributeKey, AttributeWeights, BeverageCategory, ProfileOverride, ProfileTable,
};
use crate::validation::validate_weights;

/// Reference serving volume that prices are normalized to
pub const REFERENCE_VOLUME_ML: f64 = 375.0;

/// Empirically calibrated maximum expected composite price-value
pub const MAX_EXPECTED_COMPOSITE: f64 = 5000.0;

/// Composite blend weight of the purchase price score
pub const PURCHASE_SCORE_WEIGHT: f64 = 0.55;
/// Composite blend weight of the retail price score
pub const RETAIL_SCORE_WEIGHT: f64 = 0.25;
/// Composite blend weight of the value score
pub const VALUE_SCORE_WEIGHT: f64 = 0.20;

pub const VALUE_MULTIPLIER_MIN: f64 = 0.5;
pub const VALUE_MULTIPLIER_MAX: f64 = 2.5;

/// Bonus points are clamped to +/- this value
pub const BONUS_CAP: f64 = 0.5;
pub const BASE_RATING_CEILING: f64 = 4.5;
pub const FINAL_RATING_CEILING: f64 = 5.0;
pub const MIN_ATTRIBUTE_SCORE: u8 = 1;
pub const MAX_ATTRIBUTE_SCORE: u8 = 7;

/// Tier used for negative or NaN prices, or prices above a bounded last band
pub const FALLBACK_TIER: u32 = 200;

const DEFAULT_CONFIG_FILE: &str = "config/pourfolio";
const ENV_PREFIX: &str = "POURFOLIO";

/// Price band of the PPADS table. `max: None` is unbounded. During lookup a
/// band extends up to the next band's `min`; `max` is only enforced on the
/// last band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PpadsBand {
    pub min: f64,
    pub max: Option<f64>,
    pub tier: u32,
}

impl PpadsBand {
    const fn bounded(min: f64, max: f64, tier: u32) -> Self {
        Self {
            min,
            max: Some(max),
            tier,
        }
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && self.max.map_or(true, |max| price <= max)
    }
}

/// Price-per-alcohol-density-score bands, priced per 375 mL
pub const PPADS_BANDS: [PpadsBand; 16] = [
    PpadsBand::bounded(0.0, 2.99, 50),
    PpadsBand::bounded(3.0, 5.99, 60),
    PpadsBand::bounded(6.0, 8.99, 70),
    PpadsBand::bounded(9.0, 11.99, 80),
    PpadsBand::bounded(12.0, 14.99, 90),
    PpadsBand::bounded(15.0, 17.99, 100),
    PpadsBand::bounded(18.0, 20.99, 110),
    PpadsBand::bounded(21.0, 23.99, 120),
    PpadsBand::bounded(24.0, 26.99, 130),
    PpadsBand::bounded(27.0, 29.99, 140),
    PpadsBand::bounded(30.0, 32.99, 150),
    PpadsBand::bounded(33.0, 35.99, 160),
    PpadsBand::bounded(36.0, 38.99, 170),
    PpadsBand::bounded(39.0, 41.99, 180),
    PpadsBand::bounded(42.0, 49.99, 190),
    PpadsBand {
        min: 50.0,
        max: None,
        tier: 200,
    },
];

/// Weights of the composite price-value blend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CompositeWeights {
    pub purchase: f64,
    pub retail: f64,
    pub value: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            purchase: PURCHASE_SCORE_WEIGHT,
            retail: RETAIL_SCORE_WEIGHT,
            value: VALUE_SCORE_WEIGHT,
        }
    }
}

impl CompositeWeights {
    pub fn sum(&self) -> f64 {
        self.purchase + self.retail + self.value
    }
}

/// Constants of the price-value analyzer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PriceValueCalibration {
    pub reference_volume_ml: f64,
    pub bands: Vec<PpadsBand>,
    pub fallback_tier: u32,
    pub composite_weights: CompositeWeights,
    pub max_expected_composite: f64,
    pub value_multiplier_min: f64,
    pub value_multiplier_max: f64,
}

impl Default for PriceValueCalibration {
    fn default() -> Self {
        Self {
            reference_volume_ml: REFERENCE_VOLUME_ML,
            bands: PPADS_BANDS.to_vec(),
            fallback_tier: FALLBACK_TIER,
            composite_weights: CompositeWeights::default(),
            max_expected_composite: MAX_EXPECTED_COMPOSITE,
            value_multiplier_min: VALUE_MULTIPLIER_MIN,
            value_multiplier_max: VALUE_MULTIPLIER_MAX,
        }
    }
}

impl PriceValueCalibration {
    fn check(&self) -> EngineResult<()> {
        let invalid = |message: &str| Err(EngineError::InvalidConfig(message.to_string()));

        if (self.composite_weights.sum() - 1.0).abs() > 1e-9 {
            return invalid("composite weights must sum to 1.0");
        }
        let weights = self.composite_weights;
        if [weights.purchase, weights.retail, weights.value]
            .iter()
            .any(|w| *w < 0.0)
        {
            return invalid("composite weights cannot be negative");
        }
        if !(self.reference_volume_ml > 0.0) {
            return invalid("reference volume must be positive");
        }
        if !(self.max_expected_composite > 0.0) {
            return invalid("max expected composite must be positive");
        }
        if !(self.value_multiplier_min > 0.0 && self.value_multiplier_min <= self.value_multiplier_max) {
            return invalid("value multiplier bounds must be positive and ordered");
        }
        if self.bands.is_empty() {
            return invalid("PPADS table cannot be empty");
        }
        for (i, band) in self.bands.iter().enumerate() {
            if band.min < 0.0 || band.max.is_some_and(|max| max < band.min) {
                return invalid("PPADS band bounds must be non-negative and ordered");
            }
            if band.max.is_none() && i + 1 != self.bands.len() {
                return invalid("only the last PPADS band may be unbounded");
            }
            if i > 0 && band.min <= self.bands[i - 1].min {
                return invalid("PPADS bands must be sorted by price");
            }
        }
        Ok(())
    }
}

/// Constants of the rating aggregator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RatingCalibration {
    pub bonus_cap: f64,
    pub base_rating_ceiling: f64,
    pub final_rating_ceiling: f64,
    pub min_score: u8,
    pub max_score: u8,
}

impl Default for RatingCalibration {
    fn default() -> Self {
        Self {
            bonus_cap: BONUS_CAP,
            base_rating_ceiling: BASE_RATING_CEILING,
            final_rating_ceiling: FINAL_RATING_CEILING,
            min_score: MIN_ATTRIBUTE_SCORE,
            max_score: MAX_ATTRIBUTE_SCORE,
        }
    }
}

impl RatingCalibration {
    fn check(&self) -> EngineResult<()> {
        let invalid = |message: &str| Err(EngineError::InvalidConfig(message.to_string()));

        if !(self.bonus_cap >= 0.0) {
            return invalid("bonus cap cannot be negative");
        }
        if !(self.base_rating_ceiling > 0.0 && self.base_rating_ceiling <= self.final_rating_ceiling) {
            return invalid("base rating ceiling must be positive and at most the final ceiling");
        }
        if self.min_score == 0 || self.min_score >= self.max_score {
            return invalid("score scale must start at 1 or above and be ordered");
        }
        Ok(())
    }
}

/// Profile override as written in a config file, keyed by plain strings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ProfileOverrideConfig {
    pub weights: BTreeMap<String, f64>,
    pub max_weight_sum: Option<f64>,
}

impl ProfileOverrideConfig {
    /// Parse attribute keys strictly
    pub fn to_override(&self) -> EngineResult<ProfileOverride> {
        let weights = if self.weights.is_empty() {
            None
        } else {
            Some(
                self.weights
                    .iter()
                    .map(|(key, weight)| -> EngineResult<(AttributeKey, f64)> {
                        Ok((key.parse()?, *weight))
                    })
                    .collect::<EngineResult<AttributeWeights>>()?,
            )
        };

        Ok(ProfileOverride {
            weights,
            max_weight_sum: self.max_weight_sum,
        })
    }
}

/// Full engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub pricing: PriceValueCalibration,
    pub rating: RatingCalibration,
    /// Overrides keyed by category (`beer`, `wine`, ...)
    pub profiles: BTreeMap<String, ProfileOverrideConfig>,
}

impl EngineConfig {
    /// Load configuration from an optional file and environment variables
    pub fn load(path: Option<&Path>) -> EngineResult<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = ::config::Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let engine_config: EngineConfig = settings.try_deserialize()?;
        engine_config.check()?;

        tracing::info!(
            bands = engine_config.pricing.bands.len(),
            profile_overrides = engine_config.profiles.len(),
            "Loaded engine calibration"
        );
        Ok(engine_config)
    }

    /// Parse configuration from a TOML string, without environment overrides
    pub fn from_toml_str(toml: &str) -> EngineResult<Self> {
        let settings = ::config::Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;

        let engine_config: EngineConfig = settings.try_deserialize()?;
        engine_config.check()?;
        Ok(engine_config)
    }

    /// Verify calibration invariants
    pub fn check(&self) -> EngineResult<()> {
        self.pricing.check()?;
        self.rating.check()?;
        self.profile_table().map(|_| ())
    }

    /// Built-in profiles with the configured overrides applied.
    /// Overridden weights must pass weight validation.
    pub fn profile_table(&self) -> EngineResult<ProfileTable> {
        let mut table = ProfileTable::builtin();
        for (key, profile_config) in &self.profiles {
            let category: BeverageCategory = key.parse()?;
            table.apply_override(category, &profile_config.to_override()?)?;

            let profile = table.get(category);
            let validation = validate_weights(&profile.default_weights, profile.max_weight_sum);
            if !validation.is_valid {
                tracing::warn!(
                    category = %category,
                    sum = validation.sum,
                    max_sum = validation.max_sum,
                    "Configured profile weights are invalid"
                );
                return Err(EngineError::InvalidConfig(format!(
                    "weights for {} are invalid (sum {}, max {})",
                    category, validation.sum, validation.max_sum
                )));
            }
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttributeKey;

    #[test]
    fn test_defaults_are_consistent() {
        let config = EngineConfig::default();
        assert!(config.check().is_ok());
        assert_eq!(config.pricing.bands.len(), 16);
        assert!((config.pricing.composite_weights.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_band_tiers_step_by_ten() {
        for (i, band) in PPADS_BANDS.iter().enumerate() {
            assert_eq!(band.tier, 50 + 10 * i as u32);
        }
        assert!(PPADS_BANDS[15].contains(1_000.0));
        assert!(PPADS_BANDS[0].contains(0.0));
        assert!(PPADS_BANDS[0].contains(2.99));
        assert!(!PPADS_BANDS[0].contains(3.0));
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_toml_override() {
        let config = EngineConfig::from_toml_str(
            r#"
            [pricing]
            max_expected_composite = 6000.0

            [rating]
            bonus_cap = 0.25

            [profiles.beer]
            max_weight_sum = 14.0

            [profiles.beer.weights]
            design = 1.0
            "#,
        )
        .unwrap();

        assert_eq!(config.pricing.max_expected_composite, 6000.0);
        assert_eq!(config.pricing.reference_volume_ml, REFERENCE_VOLUME_ML);
        assert_eq!(config.rating.bonus_cap, 0.25);

        let table = config.profile_table().unwrap();
        let beer = table.get(BeverageCategory::Beer);
        assert_eq!(beer.max_weight_sum, 14.0);
        assert_eq!(beer.default_weight(AttributeKey::Design), 1.0);
    }

    #[test]
    fn test_composite_weights_must_sum_to_one() {
        let result = EngineConfig::from_toml_str(
            r#"
            [pricing.composite_weights]
            purchase = 0.6
            "#,
        );
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_unknown_keys_in_profile_override() {
        let result = EngineConfig::from_toml_str(
            r#"
            [profiles.soda]
            max_weight_sum = 10.0
            "#,
        );
        assert!(matches!(result, Err(EngineError::UnknownCategory(_))));

        let result = EngineConfig::from_toml_str(
            r#"
            [profiles.beer.weights]
            colour = 1.0
            "#,
        );
        assert!(matches!(result, Err(EngineError::UnknownAttribute(_))));
    }

    #[test]
    fn test_invalid_profile_override_rejected() {
        let result = EngineConfig::from_toml_str(
            r#"
            [profiles.wine.weights]
            aroma = 3.5
            "#,
        );
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = EngineConfig::load(None).unwrap();
        assert_eq!(config.pricing.bands, PPADS_BANDS.to_vec());
    }
}
