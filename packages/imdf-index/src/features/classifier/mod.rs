//! Classroom Classifier
//!
//! Decides whether a unit denotes a nameable classroom and derives its
//! display name and room number. Pure function of the unit's name and the
//! configuration.

use serde::Serialize;

use crate::config::{ClassifierPolicy, IndexConfig};
use crate::features::feature_store::Unit;

/// Number of id characters used in the unnamed-unit fallback
const UNNAMED_ID_PREFIX: usize = 8;

/// Literal token some exports put in place of a missing name
const NULL_TOKEN: &str = "null";

/// Classifier verdict for one unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub eligible: bool,
    /// Name after locale selection; `None` for absent or unsupported names
    pub resolved_name: Option<String>,
    /// Always populated, falling back to `"<unnamed word> <id prefix>"`
    pub display_name: String,
    /// Trimmed resolved name
    pub room_number: Option<String>,
}

/// `true` for a non-empty string of ASCII digits
pub fn is_numeric_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Clone)]
pub struct ClassroomClassifier {
    policy: ClassifierPolicy,
    locale: String,
    keywords: Vec<String>,
    room_word: String,
    unnamed_word: String,
}

impl ClassroomClassifier {
    pub fn new(config: &IndexConfig) -> Self {
        Self {
            policy: config.policy,
            locale: config.locale.clone(),
            keywords: config.keywords.iter().map(|k| k.to_lowercase()).collect(),
            room_word: config.labels.room_word.clone(),
            unnamed_word: config.labels.unnamed_word.clone(),
        }
    }

    pub fn policy(&self) -> ClassifierPolicy {
        self.policy
    }

    pub fn classify(&self, unit: &Unit) -> Classification {
        let resolved_name = unit
            .name
            .as_ref()
            .and_then(|name| name.resolve(&self.locale))
            .map(str::to_string);

        let room_number = resolved_name.as_deref().map(|name| name.trim().to_string());
        let display_name = self.display_name(&unit.id, resolved_name.as_deref());
        let eligible = resolved_name
            .as_deref()
            .map_or(false, |name| self.is_eligible_name(name));

        Classification {
            eligible,
            resolved_name,
            display_name,
            room_number,
        }
    }

    /// Eligibility of an already resolved name under the configured policy
    pub fn is_eligible_name(&self, name: &str) -> bool {
        match self.policy {
            ClassifierPolicy::Permissive => !name.is_empty(),
            ClassifierPolicy::KeywordFiltered => {
                let name = name.trim();
                if name.is_empty() || name == NULL_TOKEN {
                    return false;
                }
                if is_numeric_name(name) {
                    return true;
                }
                let lower = name.to_lowercase();
                self.keywords.iter().any(|keyword| lower.contains(keyword.as_str()))
            }
        }
    }

    /// Numeric test and verbatim fallback both use the untrimmed name
    fn display_name(&self, unit_id: &str, resolved_name: Option<&str>) -> String {
        match resolved_name {
            Some(name) if is_numeric_name(name) => format!("{} {}", self.room_word, name),
            Some(name) => name.to_string(),
            None => {
                let prefix: String = unit_id.chars().take(UNNAMED_ID_PREFIX).collect();
                format!("{} {}", self.unnamed_word, prefix)
            }
        }
    }
}
