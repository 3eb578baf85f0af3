//! Relationship Resolver
//!
//! Walks unit → level → building → address. The chain stops at the first
//! missing link; everything after it is `None`.

use crate::config::DisplayLabels;
use crate::features::feature_store::{Address, Building, FeatureStore, Level, Unit};

/// Resolved ancestry of a unit
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Lineage<'a> {
    pub level: Option<&'a Level>,
    pub building: Option<&'a Building>,
    pub address: Option<&'a Address>,
}

pub struct RelationshipResolver<'a> {
    store: &'a FeatureStore,
}

impl<'a> RelationshipResolver<'a> {
    pub fn new(store: &'a FeatureStore) -> Self {
        Self { store }
    }

    pub fn resolve(&self, unit: &Unit) -> Lineage<'a> {
        let level = unit.level_id.as_deref().and_then(|id| self.store.level(id));
        let building = level
            .and_then(|level| level.building_id.as_deref())
            .and_then(|id| self.store.building(id));
        let address = building.and_then(|building| self.address_of(building));

        Lineage {
            level,
            building,
            address,
        }
    }

    /// Address referenced by `building.address_id`, if it resolves
    pub fn address_of(&self, building: &Building) -> Option<&'a Address> {
        building
            .address_id
            .as_deref()
            .and_then(|id| self.store.address(id))
    }
}

/// Human floor label for a level ordinal
///
/// `-1` is the basement label, `n >= 0` is shown as `n + 1`, other negative
/// ordinals keep their raw value and a missing ordinal is the unknown label.
pub fn floor_label(ordinal: Option<i64>, labels: &DisplayLabels) -> String {
    match ordinal {
        None => labels.unknown_floor.clone(),
        Some(-1) => labels.basement_floor.clone(),
        Some(n) if n >= 0 => n.saturating_add(1).to_string(),
        Some(n) => n.to_string(),
    }
}
