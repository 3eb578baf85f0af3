//! Error types for imdf-index
//!
//! Per-feature problems (broken references, missing names, unsupported
//! locales) never surface as errors; they degrade the output instead. The
//! variants below cover the few places where a caller asked for strictness.

use thiserror::Error;

use crate::config::ConfigError;
use crate::shared::FeatureKind;

/// Main error type for imdf-index operations
#[derive(Debug, Error)]
pub enum IndexError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Collection source error
    #[error("Source error: {0}")]
    Source(#[from] imdf_source::SourceError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Top-level collection is not an object with a `features` array
    #[error("Malformed {kind} collection: {reason}")]
    MalformedCollection { kind: FeatureKind, reason: String },
}

impl IndexError {
    pub fn malformed(kind: FeatureKind, reason: impl Into<String>) -> Self {
        IndexError::MalformedCollection {
            kind,
            reason: reason.into(),
        }
    }
}

/// Result type alias for imdf-index operations
pub type Result<T> = std::result::Result<T, IndexError>;
