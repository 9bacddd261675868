//! Bonus and penalty tags

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{EngineError, EngineResult};

/// Grouping label given to user-defined tags
pub const CUSTOM_BONUS_CATEGORY: &str = "Custom";

/// A bonus or penalty tag selected for a rating
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BonusAttribute {
    pub id: String,
    pub name: String,
    /// Grouping label only
    pub category: String,
    /// Signed contribution, typically -0.2 to 0.2 for catalog tags
    pub weight: f64,
    #[serde(default)]
    pub custom: bool,
}

impl BonusAttribute {
    pub fn is_positive(&self) -> bool {
        self.weight >= 0.0
    }

    /// Build a user-defined tag. Custom tags carry any finite weight.
    pub fn custom(input: CustomBonusInput) -> EngineResult<Self> {
        input.validate()?;
        if !input.weight.is_finite() {
            return Err(EngineError::InvalidInput(
                "Bonus weight must be a finite number".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            category: CUSTOM_BONUS_CATEGORY.to_string(),
            weight: input.weight,
            custom: true,
        })
    }
}

/// Input for creating a custom bonus tag
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CustomBonusInput {
    #[validate(length(min = 1, max = 40))]
    pub name: String,
    pub weight: f64,
}

fn catalog_entry(id: &str, name: &str, category: &str, weight: f64) -> BonusAttribute {
    BonusAttribute {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        weight,
        custom: false,
    }
}

/// Built-in bonus/penalty tags
pub fn bonus_catalog() -> &'static [BonusAttribute] {
    static CATALOG: OnceLock<Vec<BonusAttribute>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        vec![
            catalog_entry("memorable", "Memorable", "Experience", 0.2),
            catalog_entry("would-buy-again", "Would Buy Again", "Experience", 0.15),
            catalog_entry("great-with-food", "Great With Food", "Experience", 0.1),
            catalog_entry("true-to-style", "True To Style", "Character", 0.1),
            catalog_entry("unique", "Unique", "Character", 0.15),
            catalog_entry("complex", "Complex", "Character", 0.1),
            catalog_entry("great-value", "Great Value", "Value", 0.1),
            catalog_entry("local", "Local", "Origin", 0.05),
            catalog_entry("off-flavour", "Off Flavour", "Faults", -0.2),
            catalog_entry("too-boozy", "Too Boozy", "Faults", -0.15),
            catalog_entry("flat", "Flat", "Faults", -0.1),
            catalog_entry("cloying", "Cloying", "Faults", -0.1),
            catalog_entry("overpriced", "Overpriced", "Value", -0.1),
            catalog_entry("forgettable", "Forgettable", "Experience", -0.1),
        ]
    })
}

/// Find a catalog tag by id
pub fn find_bonus(id: &str) -> Option<&'static BonusAttribute> {
    bonus_catalog().iter().find(|b| b.id == id)
}
