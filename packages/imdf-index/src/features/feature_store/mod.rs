//! Feature Store
//!
//! Holds one mapping per IMDF feature kind, keyed by feature id.
//!
//! ## Architecture
//! - Domain: entity shapes (`Address`, `Building`, `Level`, `Unit`, ...)
//! - Store: `FeatureTable` + `FeatureStore` with lenient/strict loading

pub mod domain;
pub mod store;

pub use domain::{
    Address, Building, Footprint, ImdfFeature, Level, Opening, ResolvedBuilding, Unit, Venue,
};
pub use store::{FeatureRef, FeatureStore, FeatureTable, LoadReport};
