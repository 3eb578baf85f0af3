//! FeatureStore - one id-keyed table per IMDF feature kind
//!
//! Loading is order-independent: relationships are resolved afterwards by
//! `RelationshipResolver`, so collections can be fed in any order and any
//! subset.

use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::domain::{Address, Building, Footprint, ImdfFeature, Level, Opening, Unit, Venue};
use crate::errors::{IndexError, Result};
use crate::shared::FeatureKind;

// ═══════════════════════════════════════════════════════════════════════════
// FeatureTable
// ═══════════════════════════════════════════════════════════════════════════

/// Id-keyed table that iterates in first-insertion order
///
/// Re-inserting an existing id replaces the row in place.
#[derive(Debug, Clone)]
pub struct FeatureTable<T> {
    rows: Vec<T>,
    positions: AHashMap<String, usize>,
}

impl<T> Default for FeatureTable<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            positions: AHashMap::new(),
        }
    }
}

impl<T: ImdfFeature> FeatureTable<T> {
    /// Insert a row, returning `true` if it replaced an existing one
    pub fn insert(&mut self, row: T) -> bool {
        match self.positions.get(row.id()) {
            Some(&pos) => {
                self.rows[pos] = row;
                true
            }
            None => {
                self.positions.insert(row.id().to_string(), self.rows.len());
                self.rows.push(row);
                false
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.positions.get(id).map(|&pos| &self.rows[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Load reporting
// ═══════════════════════════════════════════════════════════════════════════

/// Outcome of feeding one collection into the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub kind: FeatureKind,
    /// Features stored (new ids plus replacements)
    pub loaded: usize,
    /// Of `loaded`, how many replaced an existing id
    pub replaced: usize,
    /// Features whose `feature_type` is a different kind
    pub skipped_other_kind: usize,
    /// Features that are not objects or have no string `id`
    pub skipped_invalid: usize,
}

impl LoadReport {
    fn empty(kind: FeatureKind) -> Self {
        Self {
            kind,
            loaded: 0,
            replaced: 0,
            skipped_other_kind: 0,
            skipped_invalid: 0,
        }
    }
}

/// Borrowed entity of any kind, returned by `FeatureStore::get`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureRef<'a> {
    Address(&'a Address),
    Building(&'a Building),
    Level(&'a Level),
    Unit(&'a Unit),
    Footprint(&'a Footprint),
    Opening(&'a Opening),
    Venue(&'a Venue),
}

impl<'a> FeatureRef<'a> {
    pub fn kind(&self) -> FeatureKind {
        match self {
            Self::Address(_) => FeatureKind::Address,
            Self::Building(_) => FeatureKind::Building,
            Self::Level(_) => FeatureKind::Level,
            Self::Unit(_) => FeatureKind::Unit,
            Self::Footprint(_) => FeatureKind::Footprint,
            Self::Opening(_) => FeatureKind::Opening,
            Self::Venue(_) => FeatureKind::Venue,
        }
    }

    pub fn id(&self) -> &'a str {
        match self {
            Self::Address(f) => &f.id,
            Self::Building(f) => &f.id,
            Self::Level(f) => &f.id,
            Self::Unit(f) => &f.id,
            Self::Footprint(f) => &f.id,
            Self::Opening(f) => &f.id,
            Self::Venue(f) => &f.id,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// FeatureStore
// ═══════════════════════════════════════════════════════════════════════════

/// In-memory IMDF feature store, built once per dataset load
#[derive(Debug, Clone, Default)]
pub struct FeatureStore {
    addresses: FeatureTable<Address>,
    buildings: FeatureTable<Building>,
    levels: FeatureTable<Level>,
    units: FeatureTable<Unit>,
    footprints: FeatureTable<Footprint>,
    openings: FeatureTable<Opening>,
    venues: FeatureTable<Venue>,
}

impl FeatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a collection into the table for `kind` (lenient)
    ///
    /// An absent collection, or one without a `features` array, is a no-op.
    /// Only features whose `feature_type` equals `kind` are stored.
    pub fn load(&mut self, kind: FeatureKind, collection: Option<&Value>) -> LoadReport {
        let Some(collection) = collection else {
            debug!("{} collection unavailable, continuing without it", kind);
            return LoadReport::empty(kind);
        };

        match self.try_load(kind, collection) {
            Ok(report) => report,
            Err(err) => {
                warn!("skipping collection: {}", err);
                LoadReport::empty(kind)
            }
        }
    }

    /// Feed a collection into the table for `kind` (strict)
    ///
    /// Fails with `MalformedCollection` when the top-level value is not an
    /// object with a `features` array. Per-feature problems are still
    /// skipped and counted, never raised.
    pub fn try_load(&mut self, kind: FeatureKind, collection: &Value) -> Result<LoadReport> {
        let features = features_of(collection)
            .ok_or_else(|| IndexError::malformed(kind, "expected an object with a `features` array"))?;

        let report = match kind {
            FeatureKind::Address => load_into(&mut self.addresses, features),
            FeatureKind::Building => load_into(&mut self.buildings, features),
            FeatureKind::Level => load_into(&mut self.levels, features),
            FeatureKind::Unit => load_into(&mut self.units, features),
            FeatureKind::Footprint => load_into(&mut self.footprints, features),
            FeatureKind::Opening => load_into(&mut self.openings, features),
            FeatureKind::Venue => load_into(&mut self.venues, features),
        };

        debug!(
            kind = %kind,
            loaded = report.loaded,
            replaced = report.replaced,
            skipped_other_kind = report.skipped_other_kind,
            skipped_invalid = report.skipped_invalid,
            "collection loaded"
        );
        Ok(report)
    }

    /// Look up any entity by kind and id
    pub fn get(&self, kind: FeatureKind, id: &str) -> Option<FeatureRef<'_>> {
        match kind {
            FeatureKind::Address => self.addresses.get(id).map(FeatureRef::Address),
            FeatureKind::Building => self.buildings.get(id).map(FeatureRef::Building),
            FeatureKind::Level => self.levels.get(id).map(FeatureRef::Level),
            FeatureKind::Unit => self.units.get(id).map(FeatureRef::Unit),
            FeatureKind::Footprint => self.footprints.get(id).map(FeatureRef::Footprint),
            FeatureKind::Opening => self.openings.get(id).map(FeatureRef::Opening),
            FeatureKind::Venue => self.venues.get(id).map(FeatureRef::Venue),
        }
    }

    pub fn address(&self, id: &str) -> Option<&Address> {
        self.addresses.get(id)
    }

    pub fn building(&self, id: &str) -> Option<&Building> {
        self.buildings.get(id)
    }

    pub fn level(&self, id: &str) -> Option<&Level> {
        self.levels.get(id)
    }

    pub fn unit(&self, id: &str) -> Option<&Unit> {
        self.units.get(id)
    }

    pub fn addresses(&self) -> &FeatureTable<Address> {
        &self.addresses
    }

    pub fn buildings(&self) -> &FeatureTable<Building> {
        &self.buildings
    }

    pub fn levels(&self) -> &FeatureTable<Level> {
        &self.levels
    }

    pub fn units(&self) -> &FeatureTable<Unit> {
        &self.units
    }

    pub fn footprints(&self) -> &FeatureTable<Footprint> {
        &self.footprints
    }

    pub fn openings(&self) -> &FeatureTable<Opening> {
        &self.openings
    }

    pub fn venues(&self) -> &FeatureTable<Venue> {
        &self.venues
    }

    /// Row count per kind
    pub fn counts(&self) -> BTreeMap<FeatureKind, usize> {
        BTreeMap::from([
            (FeatureKind::Address, self.addresses.len()),
            (FeatureKind::Building, self.buildings.len()),
            (FeatureKind::Level, self.levels.len()),
            (FeatureKind::Unit, self.units.len()),
            (FeatureKind::Footprint, self.footprints.len()),
            (FeatureKind::Opening, self.openings.len()),
            (FeatureKind::Venue, self.venues.len()),
        ])
    }
}

fn features_of(collection: &Value) -> Option<&Vec<Value>> {
    collection.as_object()?.get("features")?.as_array()
}

fn load_into<T: ImdfFeature>(table: &mut FeatureTable<T>, features: &[Value]) -> LoadReport {
    let empty = Map::new();
    let mut report = LoadReport::empty(T::KIND);

    for feature in features {
        let Some(feature) = feature.as_object() else {
            report.skipped_invalid += 1;
            continue;
        };
        if feature.get("feature_type").and_then(Value::as_str) != Some(T::KIND.as_str()) {
            report.skipped_other_kind += 1;
            continue;
        }
        let Some(id) = feature.get("id").and_then(Value::as_str) else {
            report.skipped_invalid += 1;
            continue;
        };

        let properties = feature
            .get("properties")
            .and_then(Value::as_object)
            .unwrap_or(&empty);
        let geometry = feature.get("geometry").filter(|g| !g.is_null()).cloned();

        if table.insert(T::from_parts(id.to_string(), properties, geometry)) {
            report.replaced += 1;
        }
        report.loaded += 1;
    }

    report
}
