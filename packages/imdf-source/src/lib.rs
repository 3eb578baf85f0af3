//! imdf-source - acquisition of raw IMDF feature collections
//!
//! An IMDF dataset is a set of independent GeoJSON files, one per feature
//! kind (`address`, `building`, `level`, `unit`, `footprint`, `opening`,
//! `venue`). Each of them may be missing; a missing collection is reported
//! as `Ok(None)` rather than an error so callers can degrade to a partial
//! dataset.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use imdf_source::{DirectorySource, FeatureSource};
//!
//! let source = DirectorySource::new("./imdf-data")?;
//! if let Some(units) = source.fetch("unit").await? {
//!     // hand over to the index builder
//! }
//! ```

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::{ErrorKind, Result, SourceError};

pub use domain::{FeatureSource, GEOJSON_EXTENSION};
pub use infrastructure::{DirectorySource, MemorySource};
