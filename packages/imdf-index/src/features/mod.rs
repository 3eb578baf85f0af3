//! Feature modules
//!
//! - `feature_store`: typed IMDF entity tables
//! - `classifier`: classroom eligibility and display names
//! - `resolver`: unit → level → building → address lineage
//! - `index_builder`: end-to-end classroom index
//! - `telemetry`: sensor readings joined onto classrooms
//! - `map_export`: GeoJSON for renderers

pub mod classifier;
pub mod feature_store;
pub mod index_builder;
pub mod map_export;
pub mod resolver;
pub mod telemetry;
