//! Index builder domain models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::DisplayLabels;
use crate::features::feature_store::{FeatureStore, LoadReport, ResolvedBuilding};
use crate::shared::FeatureKind;

// ═══════════════════════════════════════════════════════════════════════════
// Input
// ═══════════════════════════════════════════════════════════════════════════

/// Raw feature collections of one dataset, any subset of kinds
#[derive(Debug, Clone, Default)]
pub struct RawCollections {
    collections: BTreeMap<FeatureKind, Value>,
}

impl RawCollections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: FeatureKind, collection: Value) -> Self {
        self.insert(kind, collection);
        self
    }

    pub fn insert(&mut self, kind: FeatureKind, collection: Value) {
        self.collections.insert(kind, collection);
    }

    pub fn get(&self, kind: FeatureKind) -> Option<&Value> {
        self.collections.get(&kind)
    }

    /// Kinds present in this bundle
    pub fn kinds(&self) -> impl Iterator<Item = FeatureKind> + '_ {
        self.collections.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Output
// ═══════════════════════════════════════════════════════════════════════════

/// Display-ready classroom record
///
/// Every field is populated or set to an explicit fallback. `id` equals the
/// source unit id and is the key renderers use for sensor association.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classroom {
    pub id: String,
    pub name: String,
    pub room_number: Option<String>,
    pub building_name: String,
    pub address_text: Option<String>,
    pub floor: String,
    pub level_id: String,
    pub building_id: Option<String>,
    pub building: Option<ResolvedBuilding>,
    pub geometry: Option<Value>,
}

impl Classroom {
    /// Address text, or the "address not specified" label
    pub fn address_or<'a>(&'a self, labels: &'a DisplayLabels) -> &'a str {
        self.address_text
            .as_deref()
            .unwrap_or(&labels.address_not_specified)
    }
}

/// Counters collected while building an index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    pub units_seen: usize,
    /// Units rejected by the classifier
    pub ineligible_units: usize,
    /// Eligible units whose level does not resolve
    pub unresolved_units: usize,
    pub classrooms: usize,
    pub buildings: usize,
    pub duration_ms: u64,
}

/// Dataset-level statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub total_buildings: usize,
    pub total_addresses: usize,
    pub total_units: usize,
    pub total_levels: usize,
    pub total_classrooms: usize,
    /// Classrooms whose room number is purely numeric
    pub numbered_classrooms: usize,
}

/// Immutable result of one build
#[derive(Debug, Clone)]
pub struct ClassroomIndex {
    pub(crate) classrooms: Vec<Classroom>,
    pub(crate) buildings: Vec<ResolvedBuilding>,
    pub(crate) store: FeatureStore,
    pub(crate) reports: Vec<LoadReport>,
    pub(crate) summary: BuildSummary,
}

impl ClassroomIndex {
    /// Classrooms in display order
    pub fn classrooms(&self) -> &[Classroom] {
        &self.classrooms
    }

    /// Buildings in store insertion order, with addresses resolved
    pub fn buildings(&self) -> &[ResolvedBuilding] {
        &self.buildings
    }

    /// Underlying feature store (venues, footprints, openings for renderers)
    pub fn store(&self) -> &FeatureStore {
        &self.store
    }

    pub fn load_reports(&self) -> &[LoadReport] {
        &self.reports
    }

    pub fn summary(&self) -> &BuildSummary {
        &self.summary
    }

    pub fn classroom(&self, id: &str) -> Option<&Classroom> {
        self.classrooms.iter().find(|c| c.id == id)
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            total_buildings: self.store.buildings().len(),
            total_addresses: self.store.addresses().len(),
            total_units: self.store.units().len(),
            total_levels: self.store.levels().len(),
            total_classrooms: self.classrooms.len(),
            numbered_classrooms: self
                .classrooms
                .iter()
                .filter(|c| {
                    c.room_number
                        .as_deref()
                        .map_or(false, crate::features::classifier::is_numeric_name)
                })
                .count(),
        }
    }

    pub fn into_classrooms(self) -> Vec<Classroom> {
        self.classrooms
    }
}
