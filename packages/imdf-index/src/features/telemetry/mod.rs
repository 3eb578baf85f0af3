//! Sensor telemetry
//!
//! Joins a current-readings snapshot onto built classrooms and derives air
//! quality bands, filters and statistics from the result.

mod domain;
mod filter;
mod merge;

pub use domain::{AirQuality, ReadingsSnapshot, RoomReading, RoomStatus, SensorReading};
pub use filter::{QualityStats, RoomFilter};
pub use merge::{merge_readings, normalize_name, JoinStrategy, DEFAULT_BUILDING_ALIASES};
