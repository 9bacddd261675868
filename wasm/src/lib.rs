//! WebAssembly module for the Pourfolio beverage journal
//!
//! Provides client-side computation for:
//! - Final ratings from attribute sliders and bonus tags
//! - Weight settings validation
//! - Cost per rating point and price-value analysis
//! - Rating and price descriptors

use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::validation::*;

use shared::{
    calculate_price_per_point, calculate_price_value, evaluate, validate_weights, EvaluationInput,
};

/// Log to the browser console and wrap as a JS error value
fn js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
    let message = format!("{}: {}", context, err);
    web_sys::console::error_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| js_error("Serialization failed", e))
}

/// Calculate a final rating.
///
/// `category` falls back to beer when unrecognized. `input_json` holds
/// `attributes`, `bonusAttributes`, `userBonusOverride` and `hideBonus`.
#[wasm_bindgen]
pub fn calculate_rating(category: &str, input_json: &str) -> Result<String, JsValue> {
    let mut input: RatingInput = serde_json::from_str(input_json)
        .map_err(|e| js_error("Invalid rating JSON", e))?;
    input.category = BeverageCategory::from_key_or_default(category);

    to_json(&shared::rate(&input))
}

/// Validate a weight map (`{"aroma": 3, ...}`) against a max sum
#[wasm_bindgen]
pub fn validate_weight_settings(weights_json: &str, max_sum: f64) -> Result<String, JsValue> {
    let weights: AttributeWeights = serde_json::from_str(weights_json)
        .map_err(|e| js_error("Invalid weights JSON", e))?;

    to_json(&validate_weights(&weights, max_sum))
}

/// Cost per rating point for purchase and retail price
#[wasm_bindgen]
pub fn calculate_cost_per_point(
    purchase_price: Option<f64>,
    retail_price: Option<f64>,
    final_score: Option<f64>,
) -> Result<String, JsValue> {
    to_json(&calculate_price_per_point(
        purchase_price,
        retail_price,
        final_score,
    ))
}

/// Price-value analysis. Rejects a non-positive volume before analyzing.
#[wasm_bindgen]
pub fn analyze_price_value(
    purchase_price: f64,
    retail_price: f64,
    volume_ml: f64,
    total_score: f64,
) -> Result<String, JsValue> {
    PriceInput::new(purchase_price, retail_price, volume_ml)
        .check()
        .map_err(|e| js_error("Invalid price input", e))?;

    to_json(&calculate_price_value(
        purchase_price,
        retail_price,
        volume_ml,
        total_score,
    ))
}

/// Display band for a final rating
#[wasm_bindgen]
pub fn classify_by_final_rating(score: f64) -> String {
    get_score_descriptor(score).to_string()
}

/// Verdict for a purchase price score
#[wasm_bindgen]
pub fn classify_by_price_score(purchase_price_score: f64) -> String {
    price_descriptor(purchase_price_score).to_string()
}

/// Profile for a category key as JSON
#[wasm_bindgen]
pub fn profile_json(category: &str) -> Result<String, JsValue> {
    to_json(get_profile(category))
}

/// Ordered attribute keys of a category, for building the rating form
#[wasm_bindgen]
pub fn profile_attributes(category: &str) -> js_sys::Array {
    get_profile(category)
        .attributes
        .iter()
        .map(|attribute| JsValue::from_str(attribute.key()))
        .collect()
}

/// Built-in bonus and penalty tags as JSON
#[wasm_bindgen]
pub fn bonus_catalog_json() -> Result<String, JsValue> {
    to_json(&bonus_catalog())
}

/// Create a custom bonus tag with a fresh id
#[wasm_bindgen]
pub fn create_custom_bonus(name: &str, weight: f64) -> Result<String, JsValue> {
    let bonus = BonusAttribute::custom(CustomBonusInput {
        name: name.to_string(),
        weight,
    })
    .map_err(|e| js_error("Invalid custom bonus", e))?;

    to_json(&bonus)
}

/// Rating, descriptor and price analysis in one call
#[wasm_bindgen]
pub fn evaluate_json(input_json: &str) -> Result<String, JsValue> {
    let input: EvaluationInput = serde_json::from_str(input_json)
        .map_err(|e| js_error("Invalid evaluation JSON", e))?;
    let summary = evaluate(&input).map_err(|e| js_error("Evaluation failed", e))?;

    to_json(&summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> serde_json::Value {
        serde_json::from_str(json).unwrap()
    }

    const WORKED_EXAMPLE: &str = r#"{
        "attributes": {
            "appearance": {"score": 7, "weight": 1.5},
            "aroma": {"score": 6, "weight": 3},
            "mouthfeel": {"score": 5, "weight": 3},
            "flavour": {"score": 6, "weight": 4.5},
            "follow": {"score": 5, "weight": 2.5},
            "design": {"score": 4, "weight": 0}
        },
        "bonusAttributes": [
            {"id": "memorable", "name": "Memorable", "category": "Experience", "weight": 0.2}
        ]
    }"#;

    #[test]
    fn test_calculate_rating() {
        let result = parse(&calculate_rating("beer", WORKED_EXAMPLE).unwrap());
        assert_eq!(result["baseRating"], 3.54);
        assert_eq!(result["bonusPoints"], 0.2);
        assert_eq!(result["finalRating"], 3.74);
        assert_eq!(result["hideBonus"], false);
    }

    #[test]
    fn test_calculate_rating_unknown_category() {
        let beer = calculate_rating("beer", WORKED_EXAMPLE).unwrap();
        let unknown = calculate_rating("soda", WORKED_EXAMPLE).unwrap();
        assert_eq!(beer, unknown);
    }

    #[test]
    fn test_validate_weight_settings() {
        let result = parse(
            &validate_weight_settings(
                r#"{"appearance": 3, "aroma": 3, "mouthfeel": 3, "flavour": 3, "follow": 3}"#,
                15.0,
            )
            .unwrap(),
        );
        assert_eq!(result["isValid"], true);
        assert_eq!(result["sum"], 15.0);

        let result = parse(&validate_weight_settings(r#"{"aroma": 3.5}"#, 15.0).unwrap());
        assert_eq!(result["isValid"], false);
        assert_eq!(result["errors"]["invalidRange"], true);
    }

    #[test]
    fn test_cost_per_point() {
        let result = parse(&calculate_cost_per_point(Some(8.99), Some(12.5), Some(3.74)).unwrap());
        assert_eq!(result["purchasePPP"], 2.4);
        assert_eq!(result["retailPPP"], 3.34);

        let result = parse(&calculate_cost_per_point(Some(8.99), Some(12.5), None).unwrap());
        assert!(result["purchasePPP"].is_null());
        assert!(result["retailPPP"].is_null());
    }

    #[test]
    fn test_analyze_price_value() {
        let result = parse(&analyze_price_value(8.99, 8.99, 375.0, 4.5).unwrap());
        assert_eq!(result["PurchasePrice375"], 8.99);
        assert_eq!(result["PPADS"], 70);
        assert_eq!(result["ValueMultiplier"], 1.0);
        assert_eq!(result["SavingsPercent"], 0.0);
        assert_eq!(result["Descriptor"], "GET OUT!");
    }

    #[test]
    fn test_analyze_price_value_for_a_can() {
        let result = parse(&analyze_price_value(2.84, 2.84, 355.0, 4.0).unwrap());
        assert_eq!(result["PurchasePrice375"], 3.0);
        assert_eq!(result["PPADS"], 60);
        assert_eq!(result["RPADS"], 60);
    }

    #[test]
    fn test_descriptors() {
        assert_eq!(classify_by_final_rating(5.0), "7 Out of 7");
        assert_eq!(classify_by_final_rating(1.2), "Sink Pour");
        assert_eq!(classify_by_price_score(172.0), "Get me a case!!!");
        assert_eq!(classify_by_price_score(12.0), "GET OUT!");
    }

    #[test]
    fn test_profile_json() {
        let profile = parse(&profile_json("wine").unwrap());
        assert_eq!(profile["category"], "wine");
        assert_eq!(profile["maxWeightSum"], 15.0);
        assert_eq!(profile["attributes"][0], "appearance");
    }

    #[test]
    fn test_bonus_catalog_json() {
        let catalog = parse(&bonus_catalog_json().unwrap());
        let tags = catalog.as_array().unwrap();
        assert!(tags.iter().any(|t| t["name"] == "Memorable"));
        assert!(tags.iter().any(|t| t["name"] == "Overpriced"));
    }

    #[test]
    fn test_create_custom_bonus() {
        let bonus = parse(&create_custom_bonus("Gift from a friend", 0.3).unwrap());
        assert_eq!(bonus["category"], "Custom");
        assert_eq!(bonus["custom"], true);
        assert_eq!(bonus["weight"], 0.3);
    }

    #[test]
    fn test_evaluate_json() {
        let summary = parse(
            &evaluate_json(
                r#"{
                    "rating": {"category": "cider", "attributes": {"flavour": {"score": 7}}},
                    "prices": {"purchasePrice": 6.0, "retailPrice": 7.5, "volumeMl": 500}
                }"#,
            )
            .unwrap(),
        );
        assert_eq!(summary["rating"]["finalRating"], 4.5);
        assert_eq!(summary["descriptor"], "Outstanding");
        assert_eq!(summary["priceValue"]["PurchasePrice375"], 4.5);
    }
}
