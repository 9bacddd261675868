//! Error types for the Pourfolio rating engine
//!
//! The scoring functions themselves never fail. Errors only surface from
//! strict parsing, settings saves, configuration loading and JSON entry points.

use thiserror::Error;

use crate::models::{AttributeKey, BeverageCategory};

/// Engine error types
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Unknown beverage category: {0}")]
    UnknownCategory(String),

    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Attribute {attribute} is not rated for {category}")]
    AttributeNotInProfile {
        category: BeverageCategory,
        attribute: AttributeKey,
    },

    #[error("Invalid weights: sum {sum} (max {max_sum}), exceeds max: {exceeds_max}, out of range: {invalid_range}")]
    InvalidWeights {
        sum: f64,
        max_sum: f64,
        exceeds_max: bool,
        invalid_range: bool,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Settings storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<validator::ValidationErrors> for EngineError {
    fn from(errors: validator::ValidationErrors) -> Self {
        EngineError::InvalidInput(errors.to_string())
    }
}

/// Result alias used across the engine
pub type EngineResult<T> = Result<T, EngineError>;
