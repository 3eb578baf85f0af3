//! Configuration system
//!
//! Two levels:
//! - Preset: complete defaults per deployment locale (`Preset::Russian`)
//! - Overrides: builder methods or a YAML v1 file
//!
//! # Examples
//!
//! ```rust,ignore
//! use imdf_index::config::{IndexConfig, Preset, ClassifierPolicy};
//!
//! let config = IndexConfig::preset(Preset::Russian).policy(ClassifierPolicy::Permissive);
//! let config = IndexConfig::from_yaml("campus.yaml")?;
//! ```

pub mod error;
pub mod index_config;
pub mod io;
pub mod preset;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use index_config::{ClassifierPolicy, DisplayLabels, IndexConfig};
pub use io::{ConfigExportV1, LabelOverrides};
pub use preset::Preset;
