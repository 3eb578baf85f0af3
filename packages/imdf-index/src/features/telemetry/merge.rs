//! Sensor-to-classroom association
//!
//! Two join keys are supported: the IMDF unit id carried by the sensor, or a
//! normalized `building|room` pair for feeds that only know display names.
//! When several readings share a key the last one in the document wins.

use std::collections::BTreeMap;

use ahash::AHashMap;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::domain::{AirQuality, ReadingsSnapshot, RoomReading, RoomStatus, SensorReading};
use crate::features::index_builder::Classroom;

lazy_static! {
    static ref BRACKETS: Regex = Regex::new(r"[\[\]()]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Building-name variants seen in sensor feeds, keyed by normalized form
pub const DEFAULT_BUILDING_ALIASES: &[(&str, &str)] = &[
    ("учебный корпус 1", "учебный корпус №1"),
    ("учебный корпус №1", "учебный корпус №1"),
    ("ректорат", "ректорат"),
    ("главный корпус", "главный корпус"),
];

/// How readings are keyed against classrooms
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinStrategy {
    /// Sensor `unit_id` equals classroom id
    UnitId,
    /// Normalized building name plus room number
    BuildingRoom { aliases: BTreeMap<String, String> },
}

impl JoinStrategy {
    /// Building/room join with [`DEFAULT_BUILDING_ALIASES`]
    pub fn building_room() -> Self {
        Self::building_room_with(
            DEFAULT_BUILDING_ALIASES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string())),
        )
    }

    /// Building/room join with a custom alias table (keys are normalized on insert)
    pub fn building_room_with(aliases: impl IntoIterator<Item = (String, String)>) -> Self {
        let empty = BTreeMap::new();
        let aliases = aliases
            .into_iter()
            .map(|(from, to)| (normalize_name(&from, &empty), to))
            .collect();
        Self::BuildingRoom { aliases }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "unit_id" | "unit" => Some(Self::UnitId),
            "building_room" | "name" => Some(Self::building_room()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnitId => "unit_id",
            Self::BuildingRoom { .. } => "building_room",
        }
    }

    fn sensor_key(&self, reading: &SensorReading) -> Option<String> {
        match self {
            Self::UnitId => reading.unit_id.clone(),
            Self::BuildingRoom { aliases } => building_room_key(
                reading.building_name.as_deref()?,
                reading.room_number.as_deref()?,
                aliases,
            ),
        }
    }

    fn classroom_key(&self, classroom: &Classroom) -> Option<String> {
        match self {
            Self::UnitId => Some(classroom.id.clone()),
            Self::BuildingRoom { aliases } => building_room_key(
                &classroom.building_name,
                classroom.room_number.as_deref()?,
                aliases,
            ),
        }
    }
}

/// Lowercase, drop brackets, collapse whitespace, then apply aliases
pub fn normalize_name(name: &str, aliases: &BTreeMap<String, String>) -> String {
    let lowered = name.to_lowercase();
    let stripped = BRACKETS.replace_all(&lowered, "");
    let collapsed = WHITESPACE.replace_all(&stripped, " ");
    let normalized = collapsed.trim();
    aliases
        .get(normalized)
        .cloned()
        .unwrap_or_else(|| normalized.to_string())
}

fn building_room_key(
    building: &str,
    room: &str,
    aliases: &BTreeMap<String, String>,
) -> Option<String> {
    let building = normalize_name(building, aliases);
    let room = room.trim();
    if building.is_empty() || room.is_empty() {
        return None;
    }
    Some(format!("{building}|{room}"))
}

/// Attach the matching reading (if any) to every classroom, preserving order
pub fn merge_readings(
    classrooms: &[Classroom],
    snapshot: &ReadingsSnapshot,
    strategy: &JoinStrategy,
) -> Vec<RoomStatus> {
    let mut by_key: AHashMap<String, &SensorReading> = AHashMap::new();
    for reading in &snapshot.data {
        if let Some(key) = strategy.sensor_key(reading) {
            by_key.insert(key, reading);
        }
    }

    let fallback_time = snapshot.observed_at();
    let statuses: Vec<RoomStatus> = classrooms
        .iter()
        .map(|classroom| {
            let reading = strategy
                .classroom_key(classroom)
                .and_then(|key| by_key.get(&key).copied());
            RoomStatus {
                classroom: classroom.clone(),
                air_quality: reading.and_then(|r| AirQuality::from_co2(r.co2)),
                reading: reading.map(|r| RoomReading {
                    sensor_id: r.sensor_id.clone(),
                    co2: r.co2,
                    temperature: r.temperature,
                    humidity: r.humidity,
                    observed_at: r.observed_at().or(fallback_time),
                }),
            }
        })
        .collect();

    debug!(
        strategy = strategy.as_str(),
        readings = snapshot.data.len(),
        matched = statuses.iter().filter(|s| s.has_data()).count(),
        "Merged sensor readings"
    );
    statuses
}
