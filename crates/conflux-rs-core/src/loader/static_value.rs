//! Loader serving a fixed value, typically defaults.

use super::{Fragment, Loader};
use crate::error::LoadError;
use crate::path::{is_defined, join_path};
use crate::reference::Reference;
use async_trait::async_trait;
use serde_json::Value;

/// Serves an in-memory value under a descriptive label.
#[derive(Debug, Clone)]
pub struct StaticLoader {
    label: String,
    value: Value,
}

impl StaticLoader {
    /// Serve `value`, reporting it as `label`.
    pub fn new(label: impl Into<String>, value: Value) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[async_trait]
impl Loader for StaticLoader {
    fn name(&self) -> String {
        self.label.clone()
    }

    fn load_blocking(&self) -> Result<Fragment, LoadError> {
        Ok(Fragment::Value(self.value.clone()))
    }

    /// A static value is only a source for paths it already defines.
    fn references(&self, path: &[String]) -> Vec<Reference> {
        if is_defined(&self.value, path) {
            vec![Reference::with_identifier(&self.label, join_path(path))]
        } else {
            Vec::new()
        }
    }
}
