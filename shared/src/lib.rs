//! Rating and price-value scoring engine for the Pourfolio beverage journal
//!
//! This crate is pure computation shared by the browser (via WASM) and any
//! other host. It holds the beverage profiles, the weight validator, the
//! rating aggregator and the price analyzers.

pub mod config;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod pricing;
pub mod rating;
pub mod settings;
pub mod types;
pub mod validation;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::evaluation::*;
pub use crate::models::*;
pub use crate::pricing::*;
pub use crate::rating::*;
pub use crate::settings::*;
pub use crate::types::*;
pub use crate::validation::*;
