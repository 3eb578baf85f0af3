/*
 * IMDF Index - classroom resolution over IMDF venue data
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (FeatureKind, LocalizedName)
 * - config/      : Presets + YAML v1 overrides
 * - features/    : Vertical slices (feature_store → classifier → resolver → index_builder,
 *                  telemetry, map_export)
 * - usecases/    : Async dataset loading over a FeatureSource
 *
 * Builds are synchronous and single-threaded; collection fetches fan out
 * concurrently in the usecase layer.
 */

#![allow(clippy::should_implement_trait)] // from_str naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::module_inception)] // Module naming intentional

pub mod config;
pub mod errors;
pub mod features;
pub mod shared;
pub mod usecases;

pub use config::{ClassifierPolicy, ConfigError, DisplayLabels, IndexConfig, Preset};
pub use errors::{IndexError, Result};
pub use features::classifier::{Classification, ClassroomClassifier};
pub use features::feature_store::{FeatureStore, LoadReport};
pub use features::index_builder::{
    BuildSummary, Classroom, ClassroomIndex, ClassroomIndexBuilder, IndexStats, RawCollections,
};
pub use features::map_export::to_feature_collection;
pub use features::resolver::{floor_label, Lineage, RelationshipResolver};
pub use features::telemetry::{
    merge_readings, AirQuality, JoinStrategy, QualityStats, ReadingsSnapshot, RoomFilter,
    RoomStatus, SensorReading,
};
pub use shared::{FeatureKind, LocalizedName};
pub use usecases::{load_dataset, load_readings, DatasetService};
