//! Dataset Service - fetch, build, and attach readings
//!
//! ```text
//!   FeatureSource ──fetch×7 (concurrent)──▶ RawCollections
//!                                               │
//!                                               ▼
//!                                   ClassroomIndexBuilder::build
//!                                               │
//!                                               ▼
//!                                        ClassroomIndex
//! ```
//!
//! A failed fetch is logged and treated as an unavailable collection; the
//! build itself never fails on data problems.

use std::path::Path;
use std::time::Instant;

use futures::future::join_all;
use imdf_source::FeatureSource;
use tracing::{debug, info, warn};

use crate::config::IndexConfig;
use crate::errors::Result;
use crate::features::index_builder::{ClassroomIndex, ClassroomIndexBuilder, RawCollections};
use crate::features::telemetry::ReadingsSnapshot;
use crate::shared::FeatureKind;

/// Fetch every logical collection concurrently
///
/// Absent collections and failed fetches are left out of the bundle.
pub async fn fetch_collections(source: &dyn FeatureSource) -> RawCollections {
    let fetches = FeatureKind::ALL
        .into_iter()
        .map(|kind| async move { (kind, source.fetch(kind.as_str()).await) });

    let mut raw = RawCollections::new();
    for (kind, outcome) in join_all(fetches).await {
        match outcome {
            Ok(Some(collection)) => raw.insert(kind, collection),
            Ok(None) => debug!(kind = %kind, "collection not available"),
            Err(err) => warn!(
                kind = %kind,
                source = %source.describe(),
                "collection fetch failed, treating as unavailable: {}",
                err
            ),
        }
    }
    raw
}

/// Fetch and build in one step
pub async fn load_dataset(source: &dyn FeatureSource, config: &IndexConfig) -> Result<ClassroomIndex> {
    DatasetService::new(config.clone())?.load(source).await
}

/// Read a current-readings document from disk
pub async fn load_readings(path: impl AsRef<Path>) -> Result<ReadingsSnapshot> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    let snapshot: ReadingsSnapshot = serde_json::from_slice(&bytes)?;
    debug!(
        path = %path.as_ref().display(),
        readings = snapshot.data.len(),
        "Loaded readings snapshot"
    );
    Ok(snapshot)
}

/// Reusable loader bound to one validated configuration
#[derive(Debug, Clone)]
pub struct DatasetService {
    builder: ClassroomIndexBuilder,
}

impl DatasetService {
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            builder: ClassroomIndexBuilder::new(config),
        })
    }

    pub fn config(&self) -> &IndexConfig {
        self.builder.config()
    }

    pub async fn load(&self, source: &dyn FeatureSource) -> Result<ClassroomIndex> {
        let start = Instant::now();
        let raw = fetch_collections(source).await;
        let fetched = raw.len();
        let index = self.builder.build(&raw);

        info!(
            source = %source.describe(),
            collections = fetched,
            classrooms = index.classrooms().len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Dataset loaded"
        );
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use imdf_source::{MemorySource, SourceError};
    use serde_json::{json, Value};

    use crate::config::{ClassifierPolicy, Preset};

    struct FailingSource {
        inner: MemorySource,
        failing: FeatureKind,
    }

    #[async_trait]
    impl FeatureSource for FailingSource {
        async fn fetch(&self, name: &str) -> imdf_source::Result<Option<Value>> {
            if name == self.failing.as_str() {
                return Err(SourceError::io(format!("{name}: connection reset")));
            }
            self.inner.fetch(name).await
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    fn collection(features: Vec<Value>) -> Value {
        json!({"type": "FeatureCollection", "features": features})
    }

    fn campus() -> MemorySource {
        MemorySource::new()
            .with(
                "building",
                collection(vec![json!({
                    "type": "Feature", "id": "B1", "feature_type": "building",
                    "properties": {"name": {"ru": "Ректорат"}}, "geometry": null
                })]),
            )
            .with(
                "level",
                collection(vec![json!({
                    "type": "Feature", "id": "L1", "feature_type": "level",
                    "properties": {"building_ids": ["B1"], "ordinal": 0}, "geometry": null
                })]),
            )
            .with(
                "unit",
                collection(vec![
                    json!({
                        "type": "Feature", "id": "U1", "feature_type": "unit",
                        "properties": {"level_id": "L1", "name": {"ru": "101"}}, "geometry": null
                    }),
                    json!({
                        "type": "Feature", "id": "U2", "feature_type": "unit",
                        "properties": {"level_id": "L1", "name": {"ru": "Коридор"}}, "geometry": null
                    }),
                ]),
            )
    }

    #[tokio::test]
    async fn test_load_dataset_from_memory() {
        let index = load_dataset(&campus(), &IndexConfig::default()).await.unwrap();

        assert_eq!(index.classrooms().len(), 1);
        let room = &index.classrooms()[0];
        assert_eq!(room.name, "Аудитория 101");
        assert_eq!(room.building_name, "Ректорат");
        assert_eq!(room.floor, "1");
    }

    #[tokio::test]
    async fn test_permissive_policy_through_service() {
        let config = IndexConfig::preset(Preset::Russian).policy(ClassifierPolicy::Permissive);
        let index = load_dataset(&campus(), &config).await.unwrap();
        assert_eq!(index.classrooms().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_unavailable() {
        let source = FailingSource {
            inner: campus(),
            failing: FeatureKind::Building,
        };

        let index = load_dataset(&source, &IndexConfig::default()).await.unwrap();
        assert_eq!(index.classrooms().len(), 1);
        assert_eq!(index.classrooms()[0].building_name, "Неизвестный корпус");
    }

    #[tokio::test]
    async fn test_fetch_collections_skips_absent() {
        let raw = fetch_collections(&campus()).await;
        assert_eq!(raw.len(), 3);
        assert!(raw.get(FeatureKind::Address).is_none());
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let config = IndexConfig::default().keywords(Vec::<String>::new());
        assert!(DatasetService::new(config).is_err());
    }

    #[tokio::test]
    async fn test_load_readings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("current.json");
        std::fs::write(
            &path,
            r#"{"timestamp": "2024-03-01T10:00:00Z", "data": [{"sensor_id": "S1", "unit_id": "U1", "co2": 640}]}"#,
        )
        .unwrap();

        let snapshot = load_readings(&path).await.unwrap();
        assert_eq!(snapshot.data.len(), 1);
        assert_eq!(snapshot.data[0].co2, Some(640.0));

        assert!(load_readings(dir.path().join("missing.json")).await.is_err());
    }
}
