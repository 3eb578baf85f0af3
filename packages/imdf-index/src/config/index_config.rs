//! Index configuration
//!
//! Builder-style API on top of presets:
//!
//! ```rust
//! use imdf_index::config::{ClassifierPolicy, IndexConfig, Preset};
//!
//! let config = IndexConfig::preset(Preset::Russian).policy(ClassifierPolicy::Permissive);
//! assert_eq!(config.locale, "ru");
//! assert!(config.validate().is_ok());
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigExportV1, LabelOverrides, SUPPORTED_VERSIONS};
use super::preset::Preset;

/// Unit eligibility policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierPolicy {
    /// Any unit whose name resolves for the configured locale
    Permissive,
    /// Purely numeric names, or names containing a room keyword
    KeywordFiltered,
}

impl ClassifierPolicy {
    pub fn from_str(s: &str) -> ConfigResult<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "permissive" => Ok(Self::Permissive),
            "keyword_filtered" | "keywords" => Ok(Self::KeywordFiltered),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Permissive => "permissive",
            Self::KeywordFiltered => "keyword_filtered",
        }
    }
}

impl Default for ClassifierPolicy {
    fn default() -> Self {
        Self::KeywordFiltered
    }
}

/// Fallback and decoration strings used when assembling classroom records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayLabels {
    /// Prefix for purely numeric room names ("Аудитория 205")
    pub room_word: String,
    /// Prefix for units without a name ("Помещение 3f2a9c1b")
    pub unnamed_word: String,
    /// Floor label for ordinal -1
    pub basement_floor: String,
    /// Floor label when the level has no ordinal
    pub unknown_floor: String,
    /// Building name when the building cannot be resolved
    pub unknown_building: String,
    /// Building name when the building resolves but has no usable name
    pub unnamed_building: String,
    /// Address text shown by renderers when no address resolves
    pub address_not_specified: String,
}

impl Default for DisplayLabels {
    fn default() -> Self {
        Preset::default().labels()
    }
}

impl DisplayLabels {
    fn apply(&mut self, overrides: LabelOverrides) {
        let LabelOverrides {
            room_word,
            unnamed_word,
            basement_floor,
            unknown_floor,
            unknown_building,
            unnamed_building,
            address_not_specified,
        } = overrides;

        let slots = [
            (&mut self.room_word, room_word),
            (&mut self.unnamed_word, unnamed_word),
            (&mut self.basement_floor, basement_floor),
            (&mut self.unknown_floor, unknown_floor),
            (&mut self.unknown_building, unknown_building),
            (&mut self.unnamed_building, unnamed_building),
            (&mut self.address_not_specified, address_not_specified),
        ];
        for (slot, value) in slots {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }

    fn as_overrides(&self) -> LabelOverrides {
        LabelOverrides {
            room_word: Some(self.room_word.clone()),
            unnamed_word: Some(self.unnamed_word.clone()),
            basement_floor: Some(self.basement_floor.clone()),
            unknown_floor: Some(self.unknown_floor.clone()),
            unknown_building: Some(self.unknown_building.clone()),
            unnamed_building: Some(self.unnamed_building.clone()),
            address_not_specified: Some(self.address_not_specified.clone()),
        }
    }

    fn fields(&self) -> [(&'static str, &str); 7] {
        [
            ("room_word", self.room_word.as_str()),
            ("unnamed_word", self.unnamed_word.as_str()),
            ("basement_floor", self.basement_floor.as_str()),
            ("unknown_floor", self.unknown_floor.as_str()),
            ("unknown_building", self.unknown_building.as_str()),
            ("unnamed_building", self.unnamed_building.as_str()),
            ("address_not_specified", self.address_not_specified.as_str()),
        ]
    }
}

/// Complete configuration of the classroom index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Preset the configuration was derived from
    pub preset: Preset,
    /// Locale read from localized names
    pub locale: String,
    pub policy: ClassifierPolicy,
    /// Lower-case room keywords (keyword-filtered policy only)
    pub keywords: Vec<String>,
    pub labels: DisplayLabels,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}

impl IndexConfig {
    /// Complete configuration from a preset
    pub fn preset(preset: Preset) -> Self {
        Self {
            preset,
            locale: preset.locale().to_string(),
            policy: preset.policy(),
            keywords: preset.keywords(),
            labels: preset.labels(),
        }
    }

    pub fn policy(mut self, policy: ClassifierPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Replace the keyword list (stored lower case)
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .collect();
        self
    }

    pub fn labels(mut self, labels: DisplayLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> ConfigResult<()> {
        if self.locale.trim().is_empty() {
            return Err(ConfigError::Validation("locale must not be empty".into()));
        }
        if self.policy == ClassifierPolicy::KeywordFiltered {
            if self.keywords.is_empty() {
                return Err(ConfigError::Validation(
                    "keyword_filtered policy needs at least one keyword".into(),
                ));
            }
            if self.keywords.iter().any(|k| k.is_empty()) {
                return Err(ConfigError::Validation("keywords must not be empty".into()));
            }
        }
        for (field, value) in self.labels.fields() {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "label '{}' must not be empty",
                    field
                )));
            }
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // YAML I/O
    // ═══════════════════════════════════════════════════════════════════════

    /// Load and validate a YAML v1 configuration file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let raw: serde_yaml::Value = serde_yaml::from_str(content)?;
        let version = match raw.get("version") {
            Some(v) => v.as_u64().and_then(|n| u32::try_from(n).ok()).unwrap_or(0),
            None => return Err(ConfigError::MissingVersion),
        };
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let export: ConfigExportV1 = serde_yaml::from_value(raw)?;
        let mut config = Self::preset(Preset::from_str(&export.preset)?);
        if let Some(locale) = export.locale {
            config = config.locale(locale);
        }
        if let Some(policy) = export.policy {
            config = config.policy(policy);
        }
        if let Some(keywords) = export.keywords {
            config = config.keywords(keywords);
        }
        if let Some(labels) = export.labels {
            config.labels.apply(labels);
        }

        config.validate()?;
        Ok(config)
    }

    /// Export as a self-contained YAML v1 document
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: 1,
            preset: self.preset.as_str().to_string(),
            locale: Some(self.locale.clone()),
            policy: Some(self.policy),
            keywords: Some(self.keywords.clone()),
            labels: Some(self.labels.as_overrides()),
        };
        Ok(serde_yaml::to_string(&export)?)
    }
}
