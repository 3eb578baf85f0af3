//! Shared models used across feature slices

pub mod models;

pub use models::{FeatureKind, LocalizedName};
