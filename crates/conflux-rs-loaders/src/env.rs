//! Loader reading process environment variables through a key mapper.

use crate::mapper::KeyMapper;
use async_trait::async_trait;
use conflux_rs_core::path::insert_at;
use conflux_rs_core::{Fragment, LoadError, Loader, Reference};
use log::debug;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Source label used for environment references.
pub const ENV_SOURCE: &str = "Environment variables";

/// Reads variables recognized by a [`KeyMapper`] into a nested value.
///
/// Values are kept as strings; casting is the model's job.
#[derive(Debug, Clone)]
pub struct EnvLoader {
    label: String,
    mapper: Arc<dyn KeyMapper>,
    snapshot: Option<BTreeMap<String, String>>,
}

impl EnvLoader {
    /// Loader reading the live process environment.
    pub fn new(mapper: impl KeyMapper + 'static) -> Self {
        Self::from_shared(Arc::new(mapper))
    }

    /// Loader using an already shared mapper.
    pub fn from_shared(mapper: Arc<dyn KeyMapper>) -> Self {
        Self {
            label: ENV_SOURCE.to_string(),
            mapper,
            snapshot: None,
        }
    }

    /// Read from a fixed set of variables instead of the process environment.
    pub fn with_vars<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.snapshot = Some(
            vars.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        );
        self
    }

    /// Report references under a different source label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Variables in key order; non-UTF-8 variables are skipped.
    fn vars(&self) -> BTreeMap<String, String> {
        match &self.snapshot {
            Some(vars) => vars.clone(),
            None => std::env::vars_os()
                .filter_map(|(key, value)| {
                    Some((key.into_string().ok()?, value.into_string().ok()?))
                })
                .collect(),
        }
    }
}

#[async_trait]
impl Loader for EnvLoader {
    fn name(&self) -> String {
        self.label.clone()
    }

    fn load_blocking(&self) -> Result<Fragment, LoadError> {
        let mut root = Value::Object(Map::new());
        let mut matched = 0usize;
        for (key, value) in self.vars() {
            if let Some(path) = self.mapper.path(&key) {
                insert_at(&mut root, &path, Value::String(value));
                matched += 1;
            }
        }
        debug!(
            "loaded environment variables (source={}, matched={})",
            self.label, matched
        );
        Ok(Fragment::Value(root))
    }

    fn references(&self, path: &[String]) -> Vec<Reference> {
        self.mapper
            .identifier(path)
            .map(|identifier| Reference::with_identifier(&self.label, identifier))
            .into_iter()
            .collect()
    }
}
