//! Qualitative descriptors for ratings and price scores

use serde::{Deserialize, Serialize};

/// Display band for a final rating
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScoreDescriptor {
    /// 5.0
    #[serde(rename = "7 Out of 7")]
    SevenOutOfSeven,
    /// 4.50-4.99
    #[serde(rename = "Outstanding")]
    Outstanding,
    /// 4.00-4.49
    #[serde(rename = "Excellent")]
    Excellent,
    /// 3.50-3.99
    #[serde(rename = "Very Good")]
    VeryGood,
    /// 3.00-3.49
    #[serde(rename = "Good")]
    Good,
    /// 2.50-2.99
    #[serde(rename = "Decent")]
    Decent,
    /// 1.80-2.49
    #[serde(rename = "Drinkable")]
    Drinkable,
    /// Below 1.80
    #[serde(rename = "Sink Pour")]
    SinkPour,
}

impl ScoreDescriptor {
    pub fn label(&self) -> &'static str {
        match self {
            ScoreDescriptor::SevenOutOfSeven => "7 Out of 7",
            ScoreDescriptor::Outstanding => "Outstanding",
            ScoreDescriptor::Excellent => "Excellent",
            ScoreDescriptor::VeryGood => "Very Good",
            ScoreDescriptor::Good => "Good",
            ScoreDescriptor::Decent => "Decent",
            ScoreDescriptor::Drinkable => "Drinkable",
            ScoreDescriptor::SinkPour => "Sink Pour",
        }
    }
}

impl std::fmt::Display for ScoreDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Map a final rating to its display band
pub fn get_score_descriptor(score: f64) -> ScoreDescriptor {
    if score >= 5.0 {
        ScoreDescriptor::SevenOutOfSeven
    } else if score >= 4.5 {
        ScoreDescriptor::Outstanding
    } else if score >= 4.0 {
        ScoreDescriptor::Excellent
    } else if score >= 3.5 {
        ScoreDescriptor::VeryGood
    } else if score >= 3.0 {
        ScoreDescriptor::Good
    } else if score >= 2.5 {
        ScoreDescriptor::Decent
    } else if score >= 1.8 {
        ScoreDescriptor::Drinkable
    } else {
        ScoreDescriptor::SinkPour
    }
}

/// Verdict on a purchase price score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PriceDescriptor {
    /// 170+
    #[serde(rename = "Get me a case!!!")]
    GetMeACase,
    /// 160-169.99
    #[serde(rename = "Get me another one NOW.")]
    AnotherOneNow,
    /// 150-159.99
    #[serde(rename = "Yeah, I'll have another.")]
    HaveAnother,
    /// 140-149.99
    #[serde(rename = "OK OK OK")]
    Ok,
    /// Below 140
    #[serde(rename = "GET OUT!")]
    GetOut,
}

impl PriceDescriptor {
    pub fn label(&self) -> &'static str {
        match self {
            PriceDescriptor::GetMeACase => "Get me a case!!!",
            PriceDescriptor::AnotherOneNow => "Get me another one NOW.",
            PriceDescriptor::HaveAnother => "Yeah, I'll have another.",
            PriceDescriptor::Ok => "OK OK OK",
            PriceDescriptor::GetOut => "GET OUT!",
        }
    }
}

impl std::fmt::Display for PriceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Verdict for a purchase price score
pub fn price_descriptor(purchase_price_score: f64) -> PriceDescriptor {
    if purchase_price_score >= 170.0 {
        PriceDescriptor::GetMeACase
    } else if purchase_price_score >= 160.0 {
        PriceDescriptor::AnotherOneNow
    } else if purchase_price_score >= 150.0 {
        PriceDescriptor::HaveAnother
    } else if purchase_price_score >= 140.0 {
        PriceDescriptor::Ok
    } else {
        PriceDescriptor::GetOut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_descriptor_bands() {
        assert_eq!(get_score_descriptor(5.0), ScoreDescriptor::SevenOutOfSeven);
        assert_eq!(get_score_descriptor(4.99), ScoreDescriptor::Outstanding);
        assert_eq!(get_score_descriptor(4.0), ScoreDescriptor::Excellent);
        assert_eq!(get_score_descriptor(3.74), ScoreDescriptor::VeryGood);
        assert_eq!(get_score_descriptor(3.0), ScoreDescriptor::Good);
        assert_eq!(get_score_descriptor(2.5), ScoreDescriptor::Decent);
        assert_eq!(get_score_descriptor(1.8), ScoreDescriptor::Drinkable);
        assert_eq!(get_score_descriptor(1.79), ScoreDescriptor::SinkPour);
        assert_eq!(get_score_descriptor(0.0), ScoreDescriptor::SinkPour);
    }

    #[test]
    fn test_price_descriptor_thresholds() {
        assert_eq!(price_descriptor(170.0), PriceDescriptor::GetMeACase);
        assert_eq!(price_descriptor(169.99), PriceDescriptor::AnotherOneNow);
        assert_eq!(price_descriptor(150.0), PriceDescriptor::HaveAnother);
        assert_eq!(price_descriptor(140.0), PriceDescriptor::Ok);
        assert_eq!(price_descriptor(139.99), PriceDescriptor::GetOut);
        assert_eq!(price_descriptor(0.0), PriceDescriptor::GetOut);
    }

    #[test]
    fn test_descriptor_serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&ScoreDescriptor::SevenOutOfSeven).unwrap(),
            "\"7 Out of 7\""
        );
        assert_eq!(
            serde_json::to_string(&PriceDescriptor::HaveAnother).unwrap(),
            "\"Yeah, I'll have another.\""
        );
        assert_eq!(PriceDescriptor::GetOut.to_string(), "GET OUT!");
    }
}
