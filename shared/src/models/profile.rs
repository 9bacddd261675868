//! Beverage type profiles: ratable attributes and default weights per category

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::beverage::{AttributeKey, AttributeWeights, BeverageCategory};
use crate::error::{EngineError, EngineResult};

/// Maximum allowed sum of a category's weights
pub const DEFAULT_MAX_WEIGHT_SUM: f64 = 15.0;

/// Static rating profile for one beverage category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProfile {
    pub category: BeverageCategory,
    /// Display order only
    pub attributes: Vec<AttributeKey>,
    pub default_weights: AttributeWeights,
    pub max_weight_sum: f64,
}

impl CategoryProfile {
    fn new(category: BeverageCategory, weights: &[(AttributeKey, f64)]) -> Self {
        Self {
            category,
            attributes: weights.iter().map(|(k, _)| *k).collect(),
            default_weights: weights.iter().copied().collect(),
            max_weight_sum: DEFAULT_MAX_WEIGHT_SUM,
        }
    }

    pub fn has_attribute(&self, attribute: AttributeKey) -> bool {
        self.attributes.contains(&attribute)
    }

    /// Default weight for an attribute, 0 when the profile does not list it
    pub fn default_weight(&self, attribute: AttributeKey) -> f64 {
        self.default_weights.get(attribute).unwrap_or(0.0)
    }
}

/// Per-category override of the built-in profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ProfileOverride {
    pub weights: Option<AttributeWeights>,
    pub max_weight_sum: Option<f64>,
}

/// Lookup table of all category profiles
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileTable {
    profiles: BTreeMap<BeverageCategory, CategoryProfile>,
}

impl ProfileTable {
    /// The built-in profile set
    pub fn builtin() -> Self {
        use AttributeKey::*;

        let profiles = [
            CategoryProfile::new(
                BeverageCategory::Beer,
                &[
                    (Appearance, 2.0),
                    (Aroma, 3.0),
                    (Mouthfeel, 2.0),
                    (Flavour, 3.0),
                    (Follow, 3.0),
                    (Design, 2.0),
                ],
            ),
            CategoryProfile::new(
                BeverageCategory::Wine,
                &[
                    (Appearance, 1.5),
                    (Aroma, 3.0),
                    (Body, 2.0),
                    (Flavour, 3.0),
                    (Finish, 2.5),
                    (Balance, 3.0),
                ],
            ),
            CategoryProfile::new(
                BeverageCategory::Spirits,
                &[
                    (Appearance, 1.0),
                    (Aroma, 3.0),
                    (Smoothness, 3.0),
                    (Flavour, 3.0),
                    (Finish, 3.0),
                    (Design, 2.0),
                ],
            ),
            CategoryProfile::new(
                BeverageCategory::Cider,
                &[
                    (Appearance, 2.0),
                    (Aroma, 2.5),
                    (Carbonation, 2.0),
                    (Flavour, 3.0),
                    (Sweetness, 2.5),
                    (Finish, 3.0),
                ],
            ),
            CategoryProfile::new(
                BeverageCategory::Mead,
                &[
                    (Appearance, 2.0),
                    (Aroma, 3.0),
                    (Body, 2.0),
                    (Flavour, 3.0),
                    (Sweetness, 2.0),
                    (Finish, 3.0),
                ],
            ),
            CategoryProfile::new(
                BeverageCategory::Fermented,
                &[
                    (Appearance, 2.0),
                    (Aroma, 2.5),
                    (Carbonation, 2.5),
                    (Flavour, 3.0),
                    (Tartness, 2.0),
                    (Finish, 3.0),
                ],
            ),
        ];

        Self {
            profiles: profiles.into_iter().map(|p| (p.category, p)).collect(),
        }
    }

    /// Profile for a category. Every category is present in a table built
    /// from [`ProfileTable::builtin`], so the beer fallback only matters for
    /// hand-assembled tables.
    pub fn get(&self, category: BeverageCategory) -> &CategoryProfile {
        self.profiles
            .get(&category)
            .or_else(|| self.profiles.get(&BeverageCategory::Beer))
            .unwrap_or_else(|| builtin_table().get(BeverageCategory::Beer))
    }

    /// Lenient lookup by category key
    pub fn get_by_key(&self, key: &str) -> &CategoryProfile {
        self.get(BeverageCategory::from_key_or_default(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryProfile> {
        self.profiles.values()
    }

    /// Apply a configured override. Attributes outside the category's
    /// profile are rejected.
    pub fn apply_override(
        &mut self,
        category: BeverageCategory,
        profile_override: &ProfileOverride,
    ) -> EngineResult<()> {
        let profile = self
            .profiles
            .get_mut(&category)
            .ok_or_else(|| EngineError::UnknownCategory(category.to_string()))?;

        if let Some(weights) = &profile_override.weights {
            if let Some(attribute) = weights.keys().find(|a| !profile.has_attribute(*a)) {
                return Err(EngineError::AttributeNotInProfile { category, attribute });
            }
            for (attribute, weight) in weights.iter() {
                profile.default_weights.insert(attribute, weight);
            }
        }
        if let Some(max_weight_sum) = profile_override.max_weight_sum {
            profile.max_weight_sum = max_weight_sum;
        }
        Ok(())
    }
}

impl Default for ProfileTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_table() -> &'static ProfileTable {
    static TABLE: OnceLock<ProfileTable> = OnceLock::new();
    TABLE.get_or_init(ProfileTable::builtin)
}

/// Built-in profile for a category key, falling back to beer when unrecognized
pub fn get_profile(key: &str) -> &'static CategoryProfile {
    builtin_table().get_by_key(key)
}

/// Built-in profile for a category
pub fn profile_for(category: BeverageCategory) -> &'static CategoryProfile {
    builtin_table().get(category)
}
