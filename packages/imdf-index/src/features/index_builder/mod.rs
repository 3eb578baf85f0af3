//! Classroom Index Builder
//!
//! Orchestrates `FeatureStore`, `ClassroomClassifier` and
//! `RelationshipResolver` into a sorted, immutable classroom list plus the
//! building list consumed by renderers.

pub mod builder;
pub mod domain;
pub mod ordering;

pub use builder::ClassroomIndexBuilder;
pub use domain::{BuildSummary, Classroom, ClassroomIndex, IndexStats, RawCollections};
pub use ordering::{compare_names, sort_for_display, Collator};
