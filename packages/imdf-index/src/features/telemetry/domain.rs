//! Telemetry domain models
//!
//! Shapes of the current-readings document served by the sensor API and of
//! the merged per-room status handed to renderers.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::features::index_builder::Classroom;

// ═══════════════════════════════════════════════════════════════════════════
// Lenient field decoding
// ═══════════════════════════════════════════════════════════════════════════

/// RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS[.f]` taken as UTC
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|v| v.as_str()).and_then(parse_timestamp))
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Readings
// ═══════════════════════════════════════════════════════════════════════════

/// One sensor row of the current-readings document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorReading {
    #[serde(default, deserialize_with = "string_or_number")]
    pub sensor_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub unit_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub building_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub room_number: Option<String>,
    #[serde(default)]
    pub co2: Option<f64>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub ts: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_update: Option<DateTime<Utc>>,
}

impl SensorReading {
    /// Row time: `ts`, falling back to `last_update`
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        self.ts.or(self.last_update)
    }
}

/// Current-readings document: `{timestamp, last_update, data: [...]}`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReadingsSnapshot {
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_update: Option<DateTime<Utc>>,
    #[serde(default)]
    pub data: Vec<SensorReading>,
}

impl ReadingsSnapshot {
    /// `last_update`, falling back to `timestamp`
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        self.last_update.or(self.timestamp)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Air quality
// ═══════════════════════════════════════════════════════════════════════════

/// CO2-based air quality band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AirQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl AirQuality {
    pub const ALL: [AirQuality; 4] = [
        AirQuality::Excellent,
        AirQuality::Good,
        AirQuality::Fair,
        AirQuality::Poor,
    ];

    /// Band for a CO2 concentration in ppm; missing or zero yields `None`
    pub fn from_co2(co2: Option<f64>) -> Option<Self> {
        let co2 = co2.filter(|v| *v != 0.0 && v.is_finite())?;
        Some(if co2 < 600.0 {
            Self::Excellent
        } else if co2 < 800.0 {
            Self::Good
        } else if co2 < 1000.0 {
            Self::Fair
        } else {
            Self::Poor
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.as_str() == s.to_lowercase())
    }
}

impl std::fmt::Display for AirQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Merged status
// ═══════════════════════════════════════════════════════════════════════════

/// Sensor values attached to a classroom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomReading {
    pub sensor_id: Option<String>,
    pub co2: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub observed_at: Option<DateTime<Utc>>,
}

/// Classroom plus its current reading, if any sensor matched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStatus {
    #[serde(flatten)]
    pub classroom: Classroom,
    pub reading: Option<RoomReading>,
    pub air_quality: Option<AirQuality>,
}

impl RoomStatus {
    pub fn has_data(&self) -> bool {
        self.reading.is_some()
    }
}
