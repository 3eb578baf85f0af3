//! Reference datasets

use serde_json::json;

use super::builders::DatasetBuilder;

/// Two buildings, one of them without an address, plus a mix of rooms
///
/// | unit | level (ordinal) | name            | eligible |
/// |------|-----------------|-----------------|----------|
/// | U205 | L1 (1)          | 205             | yes      |
/// | U10  | L1 (1)          | 10              | yes      |
/// | U9   | L0 (0)          | 9               | yes      |
/// | UB1  | LB (-1)         | 003             | yes      |
/// | ULAB | L1 (1)          | Лаборатория ХИМ | yes      |
/// | UCOR | L1 (1)          | Коридор         | no       |
/// | UWC  | L0 (0)          | null            | no       |
/// | UR1  | LR (0)          | 101             | yes      |
pub fn campus() -> DatasetBuilder {
    DatasetBuilder::new()
        .address("A1", "ул. Политехническая, 29", "Санкт-Петербург")
        .building("B1", json!({"ru": "Главный корпус", "en": "Main building"}), Some("A1"))
        .building("B2", json!({"en": "Rectorate"}), None)
        .level("L0", "B1", 0)
        .level("L1", "B1", 1)
        .level("LB", "B1", -1)
        .level("LR", "B2", 0)
        .unit("U205", "L1", json!({"ru": "205"}))
        .unit("U10", "L1", json!({"ru": "10"}))
        .unit("U9", "L0", json!({"ru": "9"}))
        .unit("UB1", "LB", json!({"ru": "003"}))
        .unit("ULAB", "L1", json!({"ru": "Лаборатория ХИМ"}))
        .unit("UCOR", "L1", json!({"ru": "Коридор"}))
        .unit("UWC", "L0", json!(null))
        .unit("UR1", "LR", json!({"ru": "101"}))
}

/// Sensor document matching part of [`campus`]
pub fn readings_json() -> serde_json::Value {
    json!({
        "timestamp": "2024-03-01T10:00:00Z",
        "last_update": "2024-03-01T10:00:00Z",
        "data": [
            {"sensor_id": "S1", "unit_id": "U205", "building_name": "Главный корпус", "room_number": "205", "co2": 540, "temperature": 21.5, "humidity": 38},
            {"sensor_id": "S2", "unit_id": "U10", "building_name": "главный  корпус", "room_number": 10, "co2": 1250, "temperature": 24.0, "humidity": 45},
            {"sensor_id": "S3", "unit_id": "UNKNOWN", "building_name": "Ректорат", "room_number": "999", "co2": 700}
        ]
    })
}
