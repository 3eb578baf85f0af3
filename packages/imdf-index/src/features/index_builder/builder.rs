//! ClassroomIndexBuilder - dataset → immutable classroom index
//!
//! ## Phases
//! 1. **Load** every available raw collection into a fresh `FeatureStore`
//! 2. **Resolve buildings** with their addresses (store insertion order)
//! 3. **Classify** every unit and drop ineligible ones
//! 4. **Resolve lineage** and assemble a `Classroom` per eligible unit
//! 5. **Sort** by display name, unit id breaking collation ties (see `ordering`)
//!
//! ## Error Handling
//! - `build` never fails: missing or malformed collections are skipped and
//!   broken references degrade to fallback labels
//! - `try_build` rejects a present collection that cannot be iterated

use std::time::Instant;

use ahash::AHashMap;
use tracing::{debug, info};

use super::domain::{BuildSummary, Classroom, ClassroomIndex, RawCollections};
use super::ordering::{sort_for_display, Collator};
use crate::config::IndexConfig;
use crate::errors::Result;
use crate::features::classifier::{Classification, ClassroomClassifier};
use crate::features::feature_store::{FeatureStore, LoadReport, ResolvedBuilding, Unit};
use crate::features::resolver::{floor_label, Lineage, RelationshipResolver};
use crate::shared::FeatureKind;

#[derive(Debug, Clone)]
pub struct ClassroomIndexBuilder {
    config: IndexConfig,
    classifier: ClassroomClassifier,
    collator: Collator,
}

impl Default for ClassroomIndexBuilder {
    fn default() -> Self {
        Self::new(IndexConfig::default())
    }
}

impl ClassroomIndexBuilder {
    pub fn new(config: IndexConfig) -> Self {
        let classifier = ClassroomClassifier::new(&config);
        let collator = Collator::for_locale(&config.locale);
        Self {
            config,
            classifier,
            collator,
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Build from any subset of collections, degrading instead of failing
    pub fn build(&self, raw: &RawCollections) -> ClassroomIndex {
        let start = Instant::now();
        let mut store = FeatureStore::new();
        let reports: Vec<LoadReport> = FeatureKind::ALL
            .iter()
            .map(|&kind| store.load(kind, raw.get(kind)))
            .collect();
        self.finish(store, reports, start)
    }

    /// Build, failing with `MalformedCollection` on the first present
    /// collection that is not an object with a `features` array
    pub fn try_build(&self, raw: &RawCollections) -> Result<ClassroomIndex> {
        let start = Instant::now();
        let mut store = FeatureStore::new();
        let mut reports = Vec::with_capacity(FeatureKind::ALL.len());
        for kind in FeatureKind::ALL {
            let report = match raw.get(kind) {
                Some(collection) => store.try_load(kind, collection)?,
                None => store.load(kind, None),
            };
            reports.push(report);
        }
        Ok(self.finish(store, reports, start))
    }

    /// Build from an already populated store
    pub fn build_from_store(&self, store: FeatureStore) -> ClassroomIndex {
        self.finish(store, Vec::new(), Instant::now())
    }

    fn finish(&self, store: FeatureStore, reports: Vec<LoadReport>, start: Instant) -> ClassroomIndex {
        let resolver = RelationshipResolver::new(&store);

        let buildings: Vec<ResolvedBuilding> = store
            .buildings()
            .iter()
            .map(|building| ResolvedBuilding {
                building: building.clone(),
                address: resolver.address_of(building).cloned(),
            })
            .collect();
        let buildings_by_id: AHashMap<&str, &ResolvedBuilding> = buildings
            .iter()
            .map(|b| (b.building.id.as_str(), b))
            .collect();

        let mut summary = BuildSummary::default();
        let mut classrooms = Vec::new();
        for unit in store.units().iter() {
            summary.units_seen += 1;

            let classification = self.classifier.classify(unit);
            if !classification.eligible {
                summary.ineligible_units += 1;
                continue;
            }

            let lineage = resolver.resolve(unit);
            match self.assemble(unit, classification, lineage, &buildings_by_id) {
                Some(classroom) => classrooms.push(classroom),
                None => {
                    debug!("unit {} skipped: level does not resolve", unit.id);
                    summary.unresolved_units += 1;
                }
            }
        }

        let classrooms = sort_for_display(
            classrooms,
            |c: &Classroom| c.name.as_str(),
            |c: &Classroom| c.id.as_str(),
            &self.collator,
        );

        summary.classrooms = classrooms.len();
        summary.buildings = buildings.len();
        summary.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            classrooms = summary.classrooms,
            buildings = summary.buildings,
            ineligible = summary.ineligible_units,
            unresolved = summary.unresolved_units,
            duration_ms = summary.duration_ms,
            "classroom index built"
        );

        ClassroomIndex {
            classrooms,
            buildings,
            store,
            reports,
            summary,
        }
    }

    /// Assemble a classroom; `None` when the unit's level does not resolve
    fn assemble(
        &self,
        unit: &Unit,
        classification: Classification,
        lineage: Lineage<'_>,
        buildings_by_id: &AHashMap<&str, &ResolvedBuilding>,
    ) -> Option<Classroom> {
        let level = lineage.level?;
        let labels = &self.config.labels;

        let building = lineage
            .building
            .and_then(|b| buildings_by_id.get(b.id.as_str()))
            .map(|resolved| (*resolved).clone());

        let building_name = match lineage.building {
            Some(b) => b
                .name
                .as_ref()
                .and_then(|name| name.resolve(&self.config.locale))
                .map(str::to_string)
                .unwrap_or_else(|| labels.unnamed_building.clone()),
            None => labels.unknown_building.clone(),
        };

        Some(Classroom {
            id: unit.id.clone(),
            name: classification.display_name,
            room_number: classification.room_number,
            building_name,
            address_text: lineage.address.and_then(|a| a.display_text()),
            floor: floor_label(level.ordinal, labels),
            level_id: level.id.clone(),
            building_id: lineage.building.map(|b| b.id.clone()),
            building,
            geometry: unit.geometry.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClassifierPolicy, Preset};
    use serde_json::{json, Value};

    fn collection(features: Vec<Value>) -> Value {
        json!({"type": "FeatureCollection", "features": features})
    }

    fn raw() -> RawCollections {
        RawCollections::new()
            .with(
                FeatureKind::Building,
                collection(vec![
                    json!({"id": "B1", "feature_type": "building", "properties": {"name": {"ru": "Главный корпус"}}}),
                ]),
            )
            .with(
                FeatureKind::Level,
                collection(vec![
                    json!({"id": "L1", "feature_type": "level", "properties": {"building_ids": ["B1"], "ordinal": 2}}),
                ]),
            )
            .with(
                FeatureKind::Unit,
                collection(vec![
                    json!({"id": "U10", "feature_type": "unit", "properties": {"level_id": "L1", "name": "10"}}),
                    json!({"id": "U9", "feature_type": "unit", "properties": {"level_id": "L1", "name": "9"}}),
                    json!({"id": "UC", "feature_type": "unit", "properties": {"level_id": "L1", "name": "Коридор"}}),
                    json!({"id": "UN", "feature_type": "unit", "properties": {"level_id": "L1"}}),
                    json!({"id": "UX", "feature_type": "unit", "properties": {"level_id": "L404", "name": "11"}}),
                ]),
            )
    }

    #[test]
    fn test_build_sorts_and_filters() {
        let index = ClassroomIndexBuilder::default().build(&raw());
        let names: Vec<&str> = index.classrooms().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Аудитория 9", "Аудитория 10"]);

        let summary = index.summary();
        assert_eq!(summary.units_seen, 5);
        assert_eq!(summary.ineligible_units, 2);
        assert_eq!(summary.unresolved_units, 1);
        assert_eq!(summary.classrooms, 2);
    }

    #[test]
    fn test_order_independent_of_unit_order() {
        let units = |names: &[(&str, &str)]| {
            let features = names
                .iter()
                .map(|(id, name)| {
                    json!({"id": id, "feature_type": "unit", "properties": {"level_id": "L1", "name": name}})
                })
                .collect();
            raw().with(FeatureKind::Unit, collection(features))
        };
        let rooms = [
            ("U1", "Кабинет 2"),
            ("U2", "Актовый зал"),
            ("U3", "Аудитория 1"),
            ("U4", "Буфет"),
            ("U5", "Кабинет 2"),
        ];
        let mut reversed = rooms;
        reversed.reverse();

        let builder =
            ClassroomIndexBuilder::new(IndexConfig::preset(Preset::Russian).policy(ClassifierPolicy::Permissive));
        let ids = |index: &ClassroomIndex| -> Vec<String> {
            index.classrooms().iter().map(|c| c.id.clone()).collect()
        };

        let forward = builder.build(&units(&rooms));
        let backward = builder.build(&units(&reversed));
        assert_eq!(ids(&forward), ids(&backward));

        let position = |id: &str| ids(&forward).iter().position(|x| x == id).unwrap();
        assert!(position("U1") < position("U5"));
    }

    #[test]
    fn test_permissive_policy_keeps_named_units() {
        let config = IndexConfig::preset(Preset::Russian).policy(ClassifierPolicy::Permissive);
        let index = ClassroomIndexBuilder::new(config).build(&raw());
        let names: Vec<&str> = index.classrooms().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Аудитория 9", "Аудитория 10", "Коридор"]);
    }

    #[test]
    fn test_classroom_fields() {
        let index = ClassroomIndexBuilder::default().build(&raw());
        let room = index.classroom("U9").unwrap();
        assert_eq!(room.building_name, "Главный корпус");
        assert_eq!(room.floor, "3");
        assert_eq!(room.room_number.as_deref(), Some("9"));
        assert_eq!(room.level_id, "L1");
        assert_eq!(room.building_id.as_deref(), Some("B1"));
        assert!(room.address_text.is_none());
        assert_eq!(room.address_or(&index_labels()), "Адрес не указан");
    }

    fn index_labels() -> crate::config::DisplayLabels {
        Preset::Russian.labels()
    }

    #[test]
    fn test_unnamed_building_label() {
        let raw = raw().with(
            FeatureKind::Building,
            collection(vec![
                json!({"id": "B1", "feature_type": "building", "properties": {"name": {"en": "Main"}}}),
            ]),
        );
        let index = ClassroomIndexBuilder::default().build(&raw);
        assert_eq!(index.classrooms()[0].building_name, "Неизвестное здание");
    }

    #[test]
    fn test_try_build_rejects_malformed() {
        let raw = raw().with(FeatureKind::Level, json!({"features": "nope"}));
        let builder = ClassroomIndexBuilder::default();

        assert!(builder.try_build(&raw).is_err());

        let index = builder.build(&raw);
        assert!(index.classrooms().is_empty());
        assert_eq!(index.summary().unresolved_units, 3);
    }

    #[test]
    fn test_load_reports_cover_every_kind() {
        let index = ClassroomIndexBuilder::default().build(&raw());
        assert_eq!(index.load_reports().len(), FeatureKind::ALL.len());
    }

    #[test]
    fn test_build_from_store() {
        let mut store = FeatureStore::new();
        let raw = raw();
        for kind in raw.kinds().collect::<Vec<_>>() {
            store.load(kind, raw.get(kind));
        }
        let index = ClassroomIndexBuilder::default().build_from_store(store);
        assert_eq!(index.classrooms().len(), 2);
        assert!(index.load_reports().is_empty());
    }
}
