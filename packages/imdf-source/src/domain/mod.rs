//! Domain layer for feature collection sources
//!
//! # Port Trait
//!
//! - `FeatureSource`: fetch one raw collection by logical name
//!
//! Fetches are independent of each other. Callers may issue all of them at
//! once and continue with whatever resolved.

use async_trait::async_trait;

use crate::Result;

/// File extension used for collections stored on disk
pub const GEOJSON_EXTENSION: &str = "geojson";

/// Source of raw GeoJSON feature collections
///
/// # Contract
///
/// - `Ok(Some(value))`: the collection exists and is valid JSON. The shape is
///   not checked here; a body without a `features` array is still returned.
/// - `Ok(None)`: the collection is not available in this source.
/// - `Err(_)`: the collection exists but could not be read or parsed.
#[async_trait]
pub trait FeatureSource: Send + Sync {
    /// Fetch a collection by logical name (`"unit"`, `"level"`, ...)
    async fn fetch(&self, name: &str) -> Result<Option<serde_json::Value>>;

    /// Human readable description used in log lines
    fn describe(&self) -> String;
}
