//! Room filtering and air-quality statistics

use serde::{Deserialize, Serialize};

use super::domain::{AirQuality, RoomStatus};

/// Conjunctive filter over merged room statuses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomFilter {
    pub building_id: Option<String>,
    pub quality: Option<AirQuality>,
    /// Keep only rooms with a matched reading
    #[serde(default)]
    pub require_data: bool,
}

impl RoomFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn building(mut self, building_id: impl Into<String>) -> Self {
        self.building_id = Some(building_id.into());
        self
    }

    pub fn quality(mut self, quality: AirQuality) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn require_data(mut self, require: bool) -> Self {
        self.require_data = require;
        self
    }

    pub fn matches(&self, status: &RoomStatus) -> bool {
        if let Some(building_id) = &self.building_id {
            if status.classroom.building_id.as_deref() != Some(building_id.as_str()) {
                return false;
            }
        }
        if let Some(quality) = self.quality {
            if status.air_quality != Some(quality) {
                return false;
            }
        }
        !self.require_data || status.has_data()
    }

    pub fn apply<'a>(&self, statuses: &'a [RoomStatus]) -> Vec<&'a RoomStatus> {
        statuses.iter().filter(|s| self.matches(s)).collect()
    }
}

/// Air-quality distribution over rooms with data
///
/// `total` counts rooms carrying a reading; `no_data` counts the rest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityStats {
    pub total: usize,
    pub excellent: usize,
    pub good: usize,
    pub fair: usize,
    pub poor: usize,
    pub no_data: usize,
}

impl QualityStats {
    pub fn from_statuses<'a>(statuses: impl IntoIterator<Item = &'a RoomStatus>) -> Self {
        let mut stats = Self::default();
        for status in statuses {
            if !status.has_data() {
                stats.no_data += 1;
                continue;
            }
            stats.total += 1;
            match status.air_quality {
                Some(AirQuality::Excellent) => stats.excellent += 1,
                Some(AirQuality::Good) => stats.good += 1,
                Some(AirQuality::Fair) => stats.fair += 1,
                Some(AirQuality::Poor) => stats.poor += 1,
                None => {}
            }
        }
        stats
    }
}
