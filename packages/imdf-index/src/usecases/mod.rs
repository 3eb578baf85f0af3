//! Usecase Layer - dataset loading and sensor snapshot ingestion
//!
//! Async entry points for callers that hold a `FeatureSource` rather than
//! already-parsed collections (CLI, embedding services).

pub mod dataset_service;

pub use dataset_service::{fetch_collections, load_dataset, load_readings, DatasetService};
