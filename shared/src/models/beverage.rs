//! Beverage categories and ratable attributes

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Beverage category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum BeverageCategory {
    #[default]
    Beer,
    Wine,
    Spirits,
    Cider,
    Mead,
    /// Kombucha-style and other fermented drinks
    Fermented,
}

impl BeverageCategory {
    pub const ALL: [BeverageCategory; 6] = [
        BeverageCategory::Beer,
        BeverageCategory::Wine,
        BeverageCategory::Spirits,
        BeverageCategory::Cider,
        BeverageCategory::Mead,
        BeverageCategory::Fermented,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            BeverageCategory::Beer => "beer",
            BeverageCategory::Wine => "wine",
            BeverageCategory::Spirits => "spirits",
            BeverageCategory::Cider => "cider",
            BeverageCategory::Mead => "mead",
            BeverageCategory::Fermented => "fermented",
        }
    }

    /// Lenient lookup used by the UI boundary: unknown keys fall back to beer
    pub fn from_key_or_default(key: &str) -> Self {
        key.parse().unwrap_or_else(|_| {
            tracing::debug!(category = key, "unknown beverage category, falling back to beer");
            BeverageCategory::Beer
        })
    }
}

impl FromStr for BeverageCategory {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beer" => Ok(BeverageCategory::Beer),
            "wine" => Ok(BeverageCategory::Wine),
            "spirits" | "spirit" => Ok(BeverageCategory::Spirits),
            "cider" => Ok(BeverageCategory::Cider),
            "mead" => Ok(BeverageCategory::Mead),
            "fermented" | "fermented-other" | "fermented_other" => Ok(BeverageCategory::Fermented),
            _ => Err(EngineError::UnknownCategory(s.to_string())),
        }
    }
}

impl std::fmt::Display for BeverageCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A single evaluative dimension of a beverage.
/// Unknown keys fail to deserialize.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKey {
    Appearance,
    Aroma,
    Mouthfeel,
    Flavour,
    /// Finish of a beer
    Follow,
    /// Label and packaging
    Design,
    Body,
    Finish,
    Balance,
    Smoothness,
    Carbonation,
    Sweetness,
    Tartness,
}

impl AttributeKey {
    pub fn key(&self) -> &'static str {
        match self {
            AttributeKey::Appearance => "appearance",
            AttributeKey::Aroma => "aroma",
            AttributeKey::Mouthfeel => "mouthfeel",
            AttributeKey::Flavour => "flavour",
            AttributeKey::Follow => "follow",
            AttributeKey::Design => "design",
            AttributeKey::Body => "body",
            AttributeKey::Finish => "finish",
            AttributeKey::Balance => "balance",
            AttributeKey::Smoothness => "smoothness",
            AttributeKey::Carbonation => "carbonation",
            AttributeKey::Sweetness => "sweetness",
            AttributeKey::Tartness => "tartness",
        }
    }
}

impl FromStr for AttributeKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let attribute = match key.as_str() {
            "appearance" => AttributeKey::Appearance,
            "aroma" => AttributeKey::Aroma,
            "mouthfeel" => AttributeKey::Mouthfeel,
            "flavour" | "flavor" => AttributeKey::Flavour,
            "follow" => AttributeKey::Follow,
            "design" => AttributeKey::Design,
            "body" => AttributeKey::Body,
            "finish" => AttributeKey::Finish,
            "balance" => AttributeKey::Balance,
            "smoothness" => AttributeKey::Smoothness,
            "carbonation" => AttributeKey::Carbonation,
            "sweetness" => AttributeKey::Sweetness,
            "tartness" => AttributeKey::Tartness,
            _ => return Err(EngineError::UnknownAttribute(s.to_string())),
        };
        Ok(attribute)
    }
}

impl std::fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Attribute → weight mapping
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct AttributeWeights(BTreeMap<AttributeKey, f64>);

impl AttributeWeights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, attribute: AttributeKey) -> Option<f64> {
        self.0.get(&attribute).copied()
    }

    pub fn insert(&mut self, attribute: AttributeKey, weight: f64) -> Option<f64> {
        self.0.insert(attribute, weight)
    }

    pub fn contains(&self, attribute: AttributeKey) -> bool {
        self.0.contains_key(&attribute)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttributeKey, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = AttributeKey> + '_ {
        self.0.keys().copied()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.values().copied()
    }

    pub fn sum(&self) -> f64 {
        self.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(AttributeKey, f64)> for AttributeWeights {
    fn from_iter<I: IntoIterator<Item = (AttributeKey, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[(AttributeKey, f64); N]> for AttributeWeights {
    fn from(pairs: [(AttributeKey, f64); N]) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_strict() {
        assert_eq!("Wine".parse::<BeverageCategory>().unwrap(), BeverageCategory::Wine);
        assert_eq!(" mead ".parse::<BeverageCategory>().unwrap(), BeverageCategory::Mead);
        assert!("soda".parse::<BeverageCategory>().is_err());
    }

    #[test]
    fn test_category_lenient_falls_back_to_beer() {
        assert_eq!(BeverageCategory::from_key_or_default("soda"), BeverageCategory::Beer);
        assert_eq!(BeverageCategory::from_key_or_default("cider"), BeverageCategory::Cider);
    }

    #[test]
    fn test_attribute_accepts_us_spelling() {
        assert_eq!("flavor".parse::<AttributeKey>().unwrap(), AttributeKey::Flavour);
        assert!("colour".parse::<AttributeKey>().is_err());
    }

    #[test]
    fn test_unknown_attribute_fails_to_deserialize() {
        let parsed: Result<AttributeWeights, _> = serde_json::from_str(r#"{"aroma": 2, "colour": 1}"#);
        assert!(parsed.is_err());

        let parsed: AttributeWeights = serde_json::from_str(r#"{"aroma": 2, "flavour": 3}"#).unwrap();
        assert_eq!(parsed.sum(), 5.0);
    }
}
