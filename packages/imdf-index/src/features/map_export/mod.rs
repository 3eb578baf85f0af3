//! GeoJSON export for map renderers
//!
//! One `Feature` per classroom, keyed by classroom id, with optional sensor
//! values taken from merged room statuses.

use ahash::AHashMap;
use serde_json::{json, Value};

use crate::features::index_builder::Classroom;
use crate::features::telemetry::RoomStatus;

/// Build a `FeatureCollection` over `classrooms`
///
/// Sensor properties are `null` for rooms without a matching status.
pub fn to_feature_collection(classrooms: &[Classroom], statuses: Option<&[RoomStatus]>) -> Value {
    let by_id: AHashMap<&str, &RoomStatus> = statuses
        .unwrap_or_default()
        .iter()
        .map(|s| (s.classroom.id.as_str(), s))
        .collect();

    let features: Vec<Value> = classrooms
        .iter()
        .map(|classroom| feature(classroom, by_id.get(classroom.id.as_str()).copied()))
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

fn feature(classroom: &Classroom, status: Option<&RoomStatus>) -> Value {
    let reading = status.and_then(|s| s.reading.as_ref());
    json!({
        "type": "Feature",
        "id": classroom.id,
        "properties": {
            "name": classroom.name,
            "building": classroom.building_name,
            "floor": classroom.floor,
            "roomNumber": classroom.room_number,
            "air_quality": status.and_then(|s| s.air_quality),
            "co2": reading.and_then(|r| r.co2),
            "temperature": reading.and_then(|r| r.temperature),
            "humidity": reading.and_then(|r| r.humidity),
        },
        "geometry": classroom.geometry.clone().unwrap_or(Value::Null),
    })
}
