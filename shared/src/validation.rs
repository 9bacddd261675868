//! Validation utilities for the Pourfolio rating engine

use serde::{Deserialize, Serialize};

use crate::config::{MAX_ATTRIBUTE_SCORE, MIN_ATTRIBUTE_SCORE};
use crate::models::AttributeWeights;

/// Lowest allowed attribute weight
pub const MIN_WEIGHT: f64 = 0.0;
/// Highest allowed attribute weight
pub const MAX_WEIGHT: f64 = 3.0;

// ============================================================================
// Weight Settings Validation
// ============================================================================

/// Independent error flags; both may be set
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WeightErrors {
    pub exceeds_max: bool,
    pub invalid_range: bool,
}

/// Outcome of validating a set of weights against a ceiling
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeightValidationResult {
    pub is_valid: bool,
    pub sum: f64,
    pub max_sum: f64,
    pub errors: WeightErrors,
}

/// Check whether a single weight is within [0, 3]
pub fn is_weight_in_range(weight: f64) -> bool {
    (MIN_WEIGHT..=MAX_WEIGHT).contains(&weight)
}

/// Validate raw weight values against a max sum.
///
/// The sum is always reported, even when the weights are invalid.
pub fn validate_weight_values<I>(weights: I, max_sum: f64) -> WeightValidationResult
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0;
    let mut invalid_range = false;
    for weight in weights {
        sum += weight;
        invalid_range |= !is_weight_in_range(weight);
    }

    let exceeds_max = sum > max_sum;
    WeightValidationResult {
        is_valid: !(exceeds_max || invalid_range),
        sum,
        max_sum,
        errors: WeightErrors {
            exceeds_max,
            invalid_range,
        },
    }
}

/// Validate a category's attribute weights
pub fn validate_weights(weights: &AttributeWeights, max_sum: f64) -> WeightValidationResult {
    validate_weight_values(weights.values(), max_sum)
}

// ============================================================================
// Rating Input Validations
// ============================================================================

/// Validate a slider score (1-7)
pub fn validate_attribute_score(score: u8) -> Result<(), &'static str> {
    if !(MIN_ATTRIBUTE_SCORE..=MAX_ATTRIBUTE_SCORE).contains(&score) {
        return Err("Attribute score must be between 1 and 7");
    }
    Ok(())
}

/// Validate a single attribute weight (0-3)
pub fn validate_weight(weight: f64) -> Result<(), &'static str> {
    if !is_weight_in_range(weight) {
        return Err("Attribute weight must be between 0 and 3");
    }
    Ok(())
}

/// Validate a manual bonus override is a usable number
pub fn validate_bonus_override(value: f64) -> Result<(), &'static str> {
    if !value.is_finite() {
        return Err("Bonus override must be a finite number");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttributeKey;

    #[test]
    fn test_weights_at_ceiling_are_valid() {
        let result = validate_weight_values([3.0, 3.0, 3.0, 3.0, 3.0], 15.0);
        assert_eq!(result.sum, 15.0);
        assert!(result.is_valid);
        assert_eq!(result.errors, WeightErrors::default());
    }

    #[test]
    fn test_weights_over_ceiling() {
        let result = validate_weight_values([3.0, 3.0, 3.0, 3.0, 3.01], 15.0);
        assert!(result.errors.exceeds_max);
        assert!(result.errors.invalid_range);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_sum_over_ceiling_with_weights_in_range() {
        let result = validate_weight_values([3.0, 3.0, 3.0, 3.0, 3.0, 0.5], 15.0);
        assert!(result.errors.exceeds_max);
        assert!(!result.errors.invalid_range);
        assert!(!result.is_valid);
        assert_eq!(result.sum, 15.5);
    }

    #[test]
    fn test_weight_out_of_range() {
        let result = validate_weight_values([3.5, 1.0], 15.0);
        assert!(result.errors.invalid_range);
        assert!(!result.errors.exceeds_max);
        assert!(!result.is_valid);

        let result = validate_weight_values([-0.5, 1.0], 15.0);
        assert!(result.errors.invalid_range);
        assert_eq!(result.sum, 0.5);
    }

    #[test]
    fn test_nan_weight_is_out_of_range() {
        let result = validate_weight_values([f64::NAN, 1.0], 15.0);
        assert!(result.errors.invalid_range);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_empty_weights_are_valid() {
        let result = validate_weight_values(std::iter::empty(), 15.0);
        assert!(result.is_valid);
        assert_eq!(result.sum, 0.0);
    }

    #[test]
    fn test_validate_attribute_weights() {
        let weights = AttributeWeights::from([
            (AttributeKey::Appearance, 2.0),
            (AttributeKey::Aroma, 3.0),
            (AttributeKey::Flavour, 3.0),
        ]);
        let result = validate_weights(&weights, 15.0);
        assert!(result.is_valid);
        assert_eq!(result.sum, 8.0);
        assert_eq!(result.max_sum, 15.0);
    }

    #[test]
    fn test_result_wire_format() {
        let result = validate_weight_values([3.5], 15.0);
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["isValid"], false);
        assert_eq!(json["maxSum"], 15.0);
        assert_eq!(json["errors"]["invalidRange"], true);
        assert_eq!(json["errors"]["exceedsMax"], false);
    }

    #[test]
    fn test_validate_attribute_score() {
        assert!(validate_attribute_score(1).is_ok());
        assert!(validate_attribute_score(7).is_ok());
        assert!(validate_attribute_score(0).is_err());
        assert!(validate_attribute_score(8).is_err());
    }

    #[test]
    fn test_validate_weight() {
        assert!(validate_weight(0.0).is_ok());
        assert!(validate_weight(3.0).is_ok());
        assert!(validate_weight(3.01).is_err());
        assert!(validate_weight(-0.1).is_err());
    }

    #[test]
    fn test_validate_bonus_override() {
        assert!(validate_bonus_override(0.0).is_ok());
        assert!(validate_bonus_override(-0.75).is_ok());
        assert!(validate_bonus_override(f64::INFINITY).is_err());
    }
}
