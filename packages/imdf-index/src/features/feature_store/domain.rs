//! IMDF entities as stored by the `FeatureStore`
//!
//! Each entity keeps only the properties the index (or the map renderer)
//! reads. Extraction is lenient: a property with the wrong JSON type is
//! treated as absent, never as an error.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::shared::{FeatureKind, LocalizedName};

/// Entity that can be built from one GeoJSON feature of its kind
pub trait ImdfFeature: Clone {
    const KIND: FeatureKind;

    fn from_parts(id: String, properties: &Map<String, Value>, geometry: Option<Value>) -> Self;

    fn id(&self) -> &str;
}

// ═══════════════════════════════════════════════════════════════════════════
// Property helpers
// ═══════════════════════════════════════════════════════════════════════════

/// Non-empty string property
fn string_prop(properties: &Map<String, Value>, key: &str) -> Option<String> {
    properties
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn name_prop(properties: &Map<String, Value>, key: &str) -> Option<LocalizedName> {
    properties.get(key).and_then(LocalizedName::from_value)
}

fn id_list_prop(properties: &Map<String, Value>, key: &str) -> Vec<String> {
    properties
        .get(key)
        .and_then(Value::as_array)
        .map(|ids| {
            ids.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

// ═══════════════════════════════════════════════════════════════════════════
// Entities
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: String,
    pub address: Option<String>,
    pub locality: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// `"<address>, <locality>"`, or whichever part is present
    pub fn display_text(&self) -> Option<String> {
        match (&self.address, &self.locality) {
            (Some(address), Some(locality)) => Some(format!("{}, {}", address, locality)),
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (None, None) => None,
        }
    }
}

impl ImdfFeature for Address {
    const KIND: FeatureKind = FeatureKind::Address;

    fn from_parts(id: String, properties: &Map<String, Value>, _geometry: Option<Value>) -> Self {
        Self {
            id,
            address: string_prop(properties, "address"),
            locality: string_prop(properties, "locality"),
            postal_code: string_prop(properties, "postal_code"),
            country: string_prop(properties, "country"),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    pub name: Option<LocalizedName>,
    pub address_id: Option<String>,
    pub category: Option<String>,
    pub geometry: Option<Value>,
}

impl ImdfFeature for Building {
    const KIND: FeatureKind = FeatureKind::Building;

    fn from_parts(id: String, properties: &Map<String, Value>, geometry: Option<Value>) -> Self {
        Self {
            id,
            name: name_prop(properties, "name"),
            address_id: string_prop(properties, "address_id"),
            category: string_prop(properties, "category"),
            geometry,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// Building with its address resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedBuilding {
    #[serde(flatten)]
    pub building: Building,
    pub address: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: String,
    pub name: Option<LocalizedName>,
    /// First entry of `building_ids`
    pub building_id: Option<String>,
    pub ordinal: Option<i64>,
    pub geometry: Option<Value>,
}

impl ImdfFeature for Level {
    const KIND: FeatureKind = FeatureKind::Level;

    fn from_parts(id: String, properties: &Map<String, Value>, geometry: Option<Value>) -> Self {
        let building_id = id_list_prop(properties, "building_ids")
            .into_iter()
            .next()
            .filter(|id| !id.is_empty());

        Self {
            id,
            name: name_prop(properties, "name"),
            building_id,
            ordinal: properties.get("ordinal").and_then(Value::as_i64),
            geometry,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub level_id: Option<String>,
    pub name: Option<LocalizedName>,
    pub category: Option<String>,
    pub geometry: Option<Value>,
}

impl ImdfFeature for Unit {
    const KIND: FeatureKind = FeatureKind::Unit;

    fn from_parts(id: String, properties: &Map<String, Value>, geometry: Option<Value>) -> Self {
        Self {
            id,
            level_id: string_prop(properties, "level_id"),
            name: name_prop(properties, "name"),
            category: string_prop(properties, "category"),
            geometry,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub id: String,
    pub building_ids: Vec<String>,
    pub geometry: Option<Value>,
}

impl ImdfFeature for Footprint {
    const KIND: FeatureKind = FeatureKind::Footprint;

    fn from_parts(id: String, properties: &Map<String, Value>, geometry: Option<Value>) -> Self {
        Self {
            id,
            building_ids: id_list_prop(properties, "building_ids"),
            geometry,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    pub id: String,
    pub level_id: Option<String>,
    pub geometry: Option<Value>,
}

impl ImdfFeature for Opening {
    const KIND: FeatureKind = FeatureKind::Opening;

    fn from_parts(id: String, properties: &Map<String, Value>, geometry: Option<Value>) -> Self {
        Self {
            id,
            level_id: string_prop(properties, "level_id"),
            geometry,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// Venue is passed through untouched for background layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub properties: Map<String, Value>,
    pub geometry: Option<Value>,
}

impl ImdfFeature for Venue {
    const KIND: FeatureKind = FeatureKind::Venue;

    fn from_parts(id: String, properties: &Map<String, Value>, geometry: Option<Value>) -> Self {
        Self {
            id,
            properties: properties.clone(),
            geometry,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_level_takes_first_building_id() {
        let level = Level::from_parts(
            "L1".into(),
            &props(json!({"building_ids": ["B1", "B2"], "ordinal": -1})),
            None,
        );
        assert_eq!(level.building_id.as_deref(), Some("B1"));
        assert_eq!(level.ordinal, Some(-1));
    }

    #[test]
    fn test_level_without_buildings_is_orphan() {
        let level = Level::from_parts("L1".into(), &props(json!({"building_ids": []})), None);
        assert!(level.building_id.is_none());
        assert!(level.ordinal.is_none());

        let level = Level::from_parts("L2".into(), &props(json!({"building_ids": [""]})), None);
        assert!(level.building_id.is_none());
    }

    #[test]
    fn test_wrong_types_are_absent() {
        let unit = Unit::from_parts(
            "U1".into(),
            &props(json!({"level_id": 7, "name": ["x"], "category": null})),
            None,
        );
        assert!(unit.level_id.is_none());
        assert!(unit.name.is_none());
        assert!(unit.category.is_none());
    }

    #[test]
    fn test_address_display_text() {
        let full = Address::from_parts(
            "A1".into(),
            &props(json!({"address": "ул. Ленина, 1", "locality": "Москва"})),
            None,
        );
        assert_eq!(full.display_text().as_deref(), Some("ул. Ленина, 1, Москва"));

        let partial = Address::from_parts("A2".into(), &props(json!({"locality": "Тверь"})), None);
        assert_eq!(partial.display_text().as_deref(), Some("Тверь"));

        let empty = Address::from_parts("A3".into(), &Map::new(), None);
        assert!(empty.display_text().is_none());
    }

    #[test]
    fn test_resolved_building_serializes_flat() {
        let resolved = ResolvedBuilding {
            building: Building::from_parts("B1".into(), &props(json!({"name": "Main"})), None),
            address: None,
        };
        let value = serde_json::to_value(&resolved).unwrap();
        assert_eq!(value["id"], "B1");
        assert_eq!(value["name"], "Main");
        assert!(value["address"].is_null());
    }
}
