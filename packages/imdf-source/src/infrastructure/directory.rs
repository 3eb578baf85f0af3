//! File system adapter for `FeatureSource`
//!
//! Layout: one `<name>.geojson` file per collection under a root directory,
//! as exported by IMDF authoring tools.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{FeatureSource, GEOJSON_EXTENSION};
use crate::{Result, SourceError};

/// Reads collections from `<root>/<name>.geojson`
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Create a source rooted at `root`
    ///
    /// Fails with `ErrorKind::Config` if `root` is not an existing directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(SourceError::config(format!(
                "Dataset root is not a directory: {}",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path the collection `name` is read from
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(SourceError::config(format!(
                "Invalid collection name: {:?}",
                name
            )));
        }
        Ok(self.root.join(format!("{}.{}", name, GEOJSON_EXTENSION)))
    }
}

#[async_trait]
impl FeatureSource for DirectorySource {
    async fn fetch(&self, name: &str) -> Result<Option<serde_json::Value>> {
        let path = self.path_for(name)?;

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("collection file missing: {}", path.display());
                return Ok(None);
            }
            Err(err) => {
                return Err(SourceError::io(format!("Cannot read {}", path.display()))
                    .with_source(err))
            }
        };

        let value = serde_json::from_slice(&bytes).map_err(|err| {
            SourceError::serialization(format!("Invalid JSON in {}", path.display()))
                .with_source(err)
        })?;
        debug!("read {} ({} bytes)", path.display(), bytes.len());
        Ok(Some(value))
    }

    fn describe(&self) -> String {
        format!("dir:{}", self.root.display())
    }
}
