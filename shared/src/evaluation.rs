//! End-to-end evaluation: rating, descriptor and price analysis in one record

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{
    get_score_descriptor, PriceInput, PricePerPoint, PriceValueAnalysis, RatingInput,
    RatingResult, ScoreDescriptor,
};
use crate::pricing::{calculate_price_per_point, calculate_price_value};
use crate::rating::rate;

/// Rating plus optional prices for one beverage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EvaluationInput {
    pub rating: RatingInput,
    pub prices: Option<PriceInput>,
}

/// Display-ready summary of an evaluation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationSummary {
    pub rating: RatingResult,
    pub descriptor: ScoreDescriptor,
    pub price_per_point: PricePerPoint,
    pub price_value: Option<PriceValueAnalysis>,
}

/// Rate a beverage and, when prices are given, analyze its value
pub fn evaluate(input: &EvaluationInput) -> EngineResult<EvaluationSummary> {
    if let Some(prices) = &input.prices {
        prices.check()?;
    }

    let rating = rate(&input.rating);
    let final_rating = rating.final_rating;

    let price_per_point = input
        .prices
        .map(|p| {
            calculate_price_per_point(
                Some(p.purchase_price),
                Some(p.retail_price),
                Some(final_rating),
            )
        })
        .unwrap_or_default();

    let price_value = input.prices.map(|p| {
        calculate_price_value(p.purchase_price, p.retail_price, p.volume_ml, final_rating)
    });

    Ok(EvaluationSummary {
        rating,
        descriptor: get_score_descriptor(final_rating),
        price_per_point,
        price_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{AttributeKey, AttributeScore, BeverageCategory, PriceDescriptor};
    use std::collections::BTreeMap;

    fn rating_input() -> RatingInput {
        RatingInput {
            category: BeverageCategory::Wine,
            attributes: BTreeMap::from([
                (AttributeKey::Aroma, AttributeScore::new(7)),
                (AttributeKey::Flavour, AttributeScore::new(7)),
            ]),
            ..RatingInput::default()
        }
    }

    #[test]
    fn test_evaluate_without_prices() {
        let summary = evaluate(&EvaluationInput {
            rating: rating_input(),
            prices: None,
        })
        .unwrap();
        assert_eq!(summary.rating.final_rating, 4.5);
        assert_eq!(summary.descriptor, ScoreDescriptor::Outstanding);
        assert_eq!(summary.price_per_point, PricePerPoint::default());
        assert!(summary.price_value.is_none());
    }

    #[test]
    fn test_evaluate_with_prices() {
        let summary = evaluate(&EvaluationInput {
            rating: rating_input(),
            prices: Some(PriceInput::new(9.0, 12.0, 375.0)),
        })
        .unwrap();
        assert_eq!(summary.price_per_point.purchase_ppp, Some(2.0));
        assert_eq!(summary.price_per_point.retail_ppp, Some(2.67));

        let value = summary.price_value.unwrap();
        assert_eq!(value.ppads, 80);
        assert_eq!(value.rpads, 90);
        assert_eq!(value.descriptor, PriceDescriptor::GetOut);
    }

    #[test]
    fn test_evaluate_rejects_bad_volume() {
        let result = evaluate(&EvaluationInput {
            rating: rating_input(),
            prices: Some(PriceInput::new(9.0, 12.0, 0.0)),
        });
        assert!(matches!(result, Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn test_evaluation_input_from_json() {
        let input: EvaluationInput = serde_json::from_str(
            r#"{
                "rating": {
                    "category": "beer",
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
                },
                "prices": {"purchasePrice": 8.99, "retailPrice": 8.99, "volumeMl": 375}
            }"#,
        )
        .unwrap();

        let summary = evaluate(&input).unwrap();
        assert_eq!(summary.rating.final_rating, 3.74);
        assert_eq!(summary.descriptor, ScoreDescriptor::VeryGood);
        assert_eq!(summary.price_value.unwrap().value_multiplier, 1.0);
    }
}
