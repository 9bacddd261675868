//! Domain models for the Pourfolio rating engine

mod beverage;
mod bonus;
mod descriptor;
mod price;
mod profile;
mod rating;

pub use beverage::*;
pub use bonus::*;
pub use descriptor::*;
pub use price::*;
pub use profile::*;
pub use rating::*;
