//! In-memory adapter for `FeatureSource`

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::FeatureSource;
use crate::Result;

/// Collections held in memory, keyed by logical name
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    collections: HashMap<String, serde_json::Value>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a collection
    pub fn with(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.collections.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

#[async_trait]
impl FeatureSource for MemorySource {
    async fn fetch(&self, name: &str) -> Result<Option<serde_json::Value>> {
        Ok(self.collections.get(name).cloned())
    }

    fn describe(&self) -> String {
        format!("memory:{} collections", self.collections.len())
    }
}
