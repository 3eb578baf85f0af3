//! Core IMDF vocabulary: feature kinds and locale-tagged names

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ═══════════════════════════════════════════════════════════════════════════
// FeatureKind
// ═══════════════════════════════════════════════════════════════════════════

/// IMDF feature kinds handled by the index
///
/// The string form is both the `feature_type` value inside a collection and
/// the logical name of the collection file (`unit` → `unit.geojson`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Address,
    Building,
    Level,
    Unit,
    Footprint,
    Opening,
    Venue,
}

impl FeatureKind {
    /// All kinds, in the order collections are fed into the store
    pub const ALL: [FeatureKind; 7] = [
        FeatureKind::Address,
        FeatureKind::Building,
        FeatureKind::Level,
        FeatureKind::Unit,
        FeatureKind::Footprint,
        FeatureKind::Opening,
        FeatureKind::Venue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::Building => "building",
            Self::Level => "level",
            Self::Unit => "unit",
            Self::Footprint => "footprint",
            Self::Opening => "opening",
            Self::Venue => "venue",
        }
    }

    /// Parse from a `feature_type` / collection name
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }

    /// File name of the collection inside an IMDF archive
    pub fn file_name(&self) -> String {
        format!("{}.geojson", self.as_str())
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// LocalizedName
// ═══════════════════════════════════════════════════════════════════════════

/// IMDF name value: either a plain string or a `locale → string` map
///
/// ```rust
/// use imdf_index::shared::LocalizedName;
/// use serde_json::json;
///
/// let name = LocalizedName::from_value(&json!({"ru": "Ректорат"})).unwrap();
/// assert_eq!(name.resolve("ru"), Some("Ректорат"));
/// assert_eq!(name.resolve("en"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedName {
    Plain(String),
    Localized(BTreeMap<String, String>),
}

impl LocalizedName {
    /// Read a name from a raw property value
    ///
    /// `null`, empty strings, and maps without any string entry yield `None`.
    /// Non-string map entries are dropped.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Some(Self::Plain(s.clone())),
            Value::Object(map) => {
                let entries: BTreeMap<String, String> = map
                    .iter()
                    .filter_map(|(locale, v)| v.as_str().map(|s| (locale.clone(), s.to_string())))
                    .collect();
                if entries.is_empty() {
                    None
                } else {
                    Some(Self::Localized(entries))
                }
            }
            _ => None,
        }
    }

    /// Resolve to a single string for `locale`
    ///
    /// Plain names resolve to themselves regardless of locale. A localized map
    /// without `locale` (or with an empty entry) resolves to `None`.
    pub fn resolve(&self, locale: &str) -> Option<&str> {
        match self {
            Self::Plain(s) => Some(s.as_str()),
            Self::Localized(map) => map
                .get(locale)
                .map(String::as_str)
                .filter(|s| !s.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_feature_kind_roundtrip_names() {
        for kind in FeatureKind::ALL {
            assert_eq!(FeatureKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(FeatureKind::from_str("anchor"), None);
        assert_eq!(FeatureKind::Unit.file_name(), "unit.geojson");
        assert_eq!(FeatureKind::Venue.to_string(), "venue");
    }

    #[test]
    fn test_feature_kind_serde_lowercase() {
        let json = serde_json::to_string(&FeatureKind::Footprint).unwrap();
        assert_eq!(json, "\"footprint\"");
    }

    #[test]
    fn test_name_plain() {
        let name = LocalizedName::from_value(&json!("205")).unwrap();
        assert_eq!(name, LocalizedName::Plain("205".into()));
        assert_eq!(name.resolve("ru"), Some("205"));
        assert_eq!(name.resolve("en"), Some("205"));
    }

    #[test]
    fn test_name_localized_missing_locale() {
        let name = LocalizedName::from_value(&json!({"en": "Library"})).unwrap();
        assert_eq!(name.resolve("ru"), None);
        assert_eq!(name.resolve("en"), Some("Library"));
    }

    #[test]
    fn test_name_absent_or_empty() {
        assert!(LocalizedName::from_value(&Value::Null).is_none());
        assert!(LocalizedName::from_value(&json!("")).is_none());
        assert!(LocalizedName::from_value(&json!({})).is_none());
        assert!(LocalizedName::from_value(&json!({"ru": null})).is_none());
        assert!(LocalizedName::from_value(&json!(42)).is_none());
    }

    #[test]
    fn test_name_serde_untagged() {
        let plain: LocalizedName = serde_json::from_value(json!("Room")).unwrap();
        assert_eq!(plain, LocalizedName::Plain("Room".into()));

        let localized: LocalizedName = serde_json::from_value(json!({"ru": "Зал"})).unwrap();
        assert_eq!(localized.resolve("ru"), Some("Зал"));
    }
}
