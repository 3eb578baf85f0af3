//! Configuration I/O (YAML schema types)
//!
//! Implementation methods live in `index_config.rs`.

use serde::{Deserialize, Serialize};

use super::index_config::ClassifierPolicy;

/// Versions `from_yaml` accepts
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    pub version: u32,

    /// Base preset
    pub preset: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<ClassifierPolicy>,

    /// Replaces the preset keyword list when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<LabelOverrides>,
}

/// Partial override of display labels
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_word: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unnamed_word: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basement_floor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unknown_floor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unknown_building: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unnamed_building: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_not_specified: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::error::ConfigError;
    use crate::config::{IndexConfig, Preset};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_yaml_roundtrip() {
        let config = IndexConfig::preset(Preset::English).policy(ClassifierPolicy::Permissive);

        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("preset: english"));
        assert!(yaml.contains("policy: permissive"));

        let recovered = IndexConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(recovered, config);
    }

    #[test]
    fn test_yaml_loading() {
        let yaml_content = r#"
version: 1
preset: russian
policy: keyword_filtered
keywords: [аудитория, кафедра]
labels:
  room_word: Ауд.
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml_content.as_bytes()).unwrap();

        let config = IndexConfig::from_yaml(temp_file.path()).unwrap();
        assert_eq!(config.keywords, vec!["аудитория", "кафедра"]);
        assert_eq!(config.labels.room_word, "Ауд.");
        assert_eq!(config.labels.unnamed_word, "Помещение");
        assert_eq!(config.locale, "ru");
    }

    #[test]
    fn test_yaml_missing_version() {
        let result = IndexConfig::from_yaml_str("preset: russian\n");
        assert!(matches!(result, Err(ConfigError::MissingVersion)));
    }

    #[test]
    fn test_yaml_unsupported_version() {
        let result = IndexConfig::from_yaml_str("version: 2\npreset: russian\n");
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn test_yaml_oversized_version_rejected() {
        // 2^32 + 1 would wrap to 1 if narrowed
        let result = IndexConfig::from_yaml_str("version: 4294967297\npreset: russian\n");
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedVersion { found: 0, .. })
        ));
    }

    #[test]
    fn test_yaml_unknown_field_rejected() {
        let result = IndexConfig::from_yaml_str("version: 1\npreset: russian\ncolour: red\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_yaml_unknown_preset() {
        let result = IndexConfig::from_yaml_str("version: 1\npreset: martian\n");
        assert!(matches!(result, Err(ConfigError::UnknownPreset(_))));
    }

    #[test]
    fn test_yaml_invalid_config_rejected() {
        let result = IndexConfig::from_yaml_str("version: 1\npreset: english\nkeywords: []\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
