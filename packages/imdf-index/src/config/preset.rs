//! Preset configurations
//!
//! Presets provide complete default configurations per deployment locale.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::index_config::{ClassifierPolicy, DisplayLabels};

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Deployed campus dataset
    ///
    /// - Locale: `ru`
    /// - Policy: keyword-filtered
    /// - Labels: "Аудитория", "Помещение", "Цокольный", ...
    Russian,

    /// English-language datasets
    ///
    /// - Locale: `en`
    /// - Policy: keyword-filtered
    /// - Labels: "Room", "Space", "Basement", ...
    English,
}

impl Preset {
    /// Parse preset from string
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "russian" | "ru" => Ok(Self::Russian),
            "english" | "en" => Ok(Self::English),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Russian => "russian",
            Self::English => "english",
        }
    }

    /// Locale read from localized IMDF names
    pub fn locale(&self) -> &'static str {
        match self {
            Self::Russian => "ru",
            Self::English => "en",
        }
    }

    pub fn policy(&self) -> ClassifierPolicy {
        ClassifierPolicy::KeywordFiltered
    }

    /// Room-designating keywords, lower case
    pub fn keywords(&self) -> Vec<String> {
        let words: &[&str] = match self {
            Self::Russian => &[
                "аудитория",
                "ауд",
                "лекционная",
                "лекция",
                "класс",
                "кабинет",
                "лаборатория",
                "лаб",
            ],
            Self::English => &["classroom", "room", "lecture", "lab", "office"],
        };
        words.iter().map(|w| w.to_string()).collect()
    }

    pub fn labels(&self) -> DisplayLabels {
        match self {
            Self::Russian => DisplayLabels {
                room_word: "Аудитория".into(),
                unnamed_word: "Помещение".into(),
                basement_floor: "Цокольный".into(),
                unknown_floor: "?".into(),
                unknown_building: "Неизвестный корпус".into(),
                unnamed_building: "Неизвестное здание".into(),
                address_not_specified: "Адрес не указан".into(),
            },
            Self::English => DisplayLabels {
                room_word: "Room".into(),
                unnamed_word: "Space".into(),
                basement_floor: "Basement".into(),
                unknown_floor: "?".into(),
                unknown_building: "Unknown building".into(),
                unnamed_building: "Unnamed building".into(),
                address_not_specified: "Address not specified".into(),
            },
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::Russian
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
