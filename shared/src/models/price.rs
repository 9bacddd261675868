//! Price and price-value models

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::descriptor::PriceDescriptor;
use crate::error::{EngineError, EngineResult};

/// Cost per rating point
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PricePerPoint {
    #[serde(rename = "purchasePPP")]
    pub purchase_ppp: Option<f64>,
    #[serde(rename = "retailPPP")]
    pub retail_ppp: Option<f64>,
}

/// Price inputs as collected by the UI.
///
/// The analyzer does not guard against a zero volume; callers validate
/// with [`PriceInput::check`] first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Validate, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PriceInput {
    #[validate(range(min = 0.0))]
    pub purchase_price: f64,
    #[validate(range(min = 0.0))]
    pub retail_price: f64,
    /// Container volume in millilitres, strictly positive
    #[validate(range(min = 0.0))]
    pub volume_ml: f64,
}

impl PriceInput {
    pub fn new(purchase_price: f64, retail_price: f64, volume_ml: f64) -> Self {
        Self {
            purchase_price,
            retail_price,
            volume_ml,
        }
    }

    /// Validate ranges and reject NaN/infinite values
    pub fn check(&self) -> EngineResult<()> {
        if ![self.purchase_price, self.retail_price, self.volume_ml]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(EngineError::InvalidInput(
                "Prices and volume must be finite numbers".to_string(),
            ));
        }
        self.validate()?;
        // range() is inclusive only
        if self.volume_ml <= 0.0 {
            return Err(EngineError::InvalidInput(
                "Volume must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Price-value analysis for one purchase
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PriceValueAnalysis {
    pub purchase_price_375: f64,
    pub retail_price_375: f64,
    #[serde(rename = "PPADS")]
    pub ppads: u32,
    #[serde(rename = "RPADS")]
    pub rpads: u32,
    pub purchase_price_score: f64,
    pub retail_price_score: f64,
    pub value_multiplier: f64,
    pub savings_percent: f64,
    pub value_score: f64,
    pub composite_price_value: f64,
    pub normalized_composite: f64,
    pub descriptor: PriceDescriptor,
}
