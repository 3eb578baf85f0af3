//! Feature and dataset builders

use imdf_index::{FeatureKind, RawCollections};
use serde_json::{json, Value};

/// IMDF feature object
pub fn feature(kind: FeatureKind, id: &str, properties: Value) -> Value {
    json!({
        "type": "Feature",
        "id": id,
        "feature_type": kind.as_str(),
        "properties": properties,
        "geometry": {"type": "Point", "coordinates": [30.3, 59.9]},
    })
}

/// Accumulates features per kind and emits one collection per kind
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    features: Vec<(FeatureKind, Value)>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address(self, id: &str, address: &str, locality: &str) -> Self {
        self.with(
            FeatureKind::Address,
            id,
            json!({"address": address, "locality": locality}),
        )
    }

    pub fn building(self, id: &str, name: Value, address_id: Option<&str>) -> Self {
        self.with(
            FeatureKind::Building,
            id,
            json!({"name": name, "address_id": address_id}),
        )
    }

    pub fn level(self, id: &str, building_id: &str, ordinal: i64) -> Self {
        self.with(
            FeatureKind::Level,
            id,
            json!({"building_ids": [building_id], "ordinal": ordinal}),
        )
    }

    pub fn unit(self, id: &str, level_id: &str, name: Value) -> Self {
        self.with(
            FeatureKind::Unit,
            id,
            json!({"level_id": level_id, "name": name, "category": "classroom"}),
        )
    }

    pub fn with(mut self, kind: FeatureKind, id: &str, properties: Value) -> Self {
        self.features.push((kind, feature(kind, id, properties)));
        self
    }

    /// One collection per kind that received at least one feature
    pub fn collections(&self) -> Vec<(FeatureKind, Value)> {
        FeatureKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let features: Vec<Value> = self
                    .features
                    .iter()
                    .filter(|(k, _)| *k == kind)
                    .map(|(_, f)| f.clone())
                    .collect();
                (!features.is_empty()).then(|| {
                    (kind, json!({"type": "FeatureCollection", "features": features}))
                })
            })
            .collect()
    }

    pub fn build(&self) -> RawCollections {
        self.collections()
            .into_iter()
            .fold(RawCollections::new(), |raw, (kind, collection)| {
                raw.with(kind, collection)
            })
    }
}
