//! Sensor readings joined onto a built index

mod common;

use common::*;
use imdf_index::features::telemetry::JoinStrategy;
use imdf_index::{
    merge_readings, to_feature_collection, AirQuality, ClassroomIndexBuilder, QualityStats,
    ReadingsSnapshot, RoomFilter,
};
use pretty_assertions::assert_eq;

fn snapshot() -> ReadingsSnapshot {
    serde_json::from_value(readings_json()).unwrap()
}

#[test]
fn test_merge_by_unit_id() {
    let index = ClassroomIndexBuilder::default().build(&campus().build());
    let statuses = merge_readings(index.classrooms(), &snapshot(), &JoinStrategy::UnitId);

    assert_eq!(statuses.len(), index.classrooms().len());
    let by_id = |id: &str| statuses.iter().find(|s| s.classroom.id == id).unwrap();
    assert_eq!(by_id("U205").air_quality, Some(AirQuality::Excellent));
    assert_eq!(by_id("U10").air_quality, Some(AirQuality::Poor));
    assert!(!by_id("U9").has_data());
}

#[test]
fn test_merge_by_building_and_room() {
    let index = ClassroomIndexBuilder::default().build(&campus().build());
    let statuses = merge_readings(index.classrooms(), &snapshot(), &JoinStrategy::building_room());

    let matched: Vec<&str> = statuses
        .iter()
        .filter(|s| s.has_data())
        .map(|s| s.classroom.id.as_str())
        .collect();
    assert_eq!(matched, vec!["U10", "U205"]);
}

#[test]
fn test_stats_and_filters() {
    let index = ClassroomIndexBuilder::default().build(&campus().build());
    let statuses = merge_readings(index.classrooms(), &snapshot(), &JoinStrategy::UnitId);

    assert_eq!(
        QualityStats::from_statuses(&statuses),
        QualityStats {
            total: 2,
            excellent: 1,
            good: 0,
            fair: 0,
            poor: 1,
            no_data: 4,
        }
    );

    let rectorate = RoomFilter::new().building("B2").apply(&statuses);
    assert_eq!(rectorate.len(), 1);
    assert_eq!(rectorate[0].classroom.id, "UR1");

    let poor = RoomFilter::new().quality(AirQuality::Poor).apply(&statuses);
    assert_eq!(poor.len(), 1);
}

#[test]
fn test_map_export_with_readings() {
    let index = ClassroomIndexBuilder::default().build(&campus().build());
    let statuses = merge_readings(index.classrooms(), &snapshot(), &JoinStrategy::UnitId);
    let collection = to_feature_collection(index.classrooms(), Some(&statuses));

    let features = collection["features"].as_array().unwrap();
    assert_eq!(features.len(), 6);
    let room = features.iter().find(|f| f["id"] == "U205").unwrap();
    assert_eq!(room["properties"]["name"], "Аудитория 205");
    assert_eq!(room["properties"]["building"], "Главный корпус");
    assert_eq!(room["properties"]["air_quality"], "excellent");
    assert_eq!(room["properties"]["co2"], 540.0);
}
