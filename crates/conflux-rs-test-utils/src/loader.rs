//! Loader doubles.

use async_trait::async_trait;
use conflux_rs_core::{Fragment, LoadError, Loader, Reference, join_path};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Shared record of loader invocations, in call order.
#[derive(Debug, Clone, Default)]
pub struct LoadLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl LoadLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, name: &str) {
        self.entries.lock().push(name.to_string());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }
}

/// Loader returning a fixed value with configurable references.
#[derive(Debug, Clone)]
pub struct StubLoader {
    name: String,
    value: Value,
    attribute_all: bool,
    references: Vec<(Vec<String>, Reference)>,
    log: Option<LoadLog>,
}

impl StubLoader {
    /// Loader with no references for any path.
    pub fn new(name: &str, value: Value) -> Self {
        Self {
            name: name.to_string(),
            value,
            attribute_all: false,
            references: Vec::new(),
            log: None,
        }
    }

    /// Loader naming itself, with the dotted path as identifier, for every path.
    pub fn attributed(name: &str, value: Value) -> Self {
        Self {
            attribute_all: true,
            ..Self::new(name, value)
        }
    }

    /// Add a reference reported for exactly `path`.
    pub fn with_reference(mut self, path: &[&str], reference: Reference) -> Self {
        let path = path.iter().map(|segment| segment.to_string()).collect();
        self.references.push((path, reference));
        self
    }

    /// Record each load in `log`.
    pub fn with_log(mut self, log: &LoadLog) -> Self {
        self.log = Some(log.clone());
        self
    }
}

#[async_trait]
impl Loader for StubLoader {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn load_blocking(&self) -> Result<Fragment, LoadError> {
        if let Some(log) = &self.log {
            log.record(&self.name);
        }
        Ok(Fragment::Value(self.value.clone()))
    }

    fn references(&self, path: &[String]) -> Vec<Reference> {
        if self.attribute_all {
            return vec![Reference::with_identifier(&self.name, join_path(path))];
        }
        self.references
            .iter()
            .filter(|(candidate, _)| candidate.as_slice() == path)
            .map(|(_, reference)| reference.clone())
            .collect()
    }
}

/// Loader that always fails.
#[derive(Debug, Clone)]
pub struct FailingLoader {
    name: String,
    message: String,
    log: Option<LoadLog>,
}

impl FailingLoader {
    pub fn new(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            message: message.to_string(),
            log: None,
        }
    }

    /// Record each load attempt in `log`.
    pub fn with_log(mut self, log: &LoadLog) -> Self {
        self.log = Some(log.clone());
        self
    }
}

#[async_trait]
impl Loader for FailingLoader {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn load_blocking(&self) -> Result<Fragment, LoadError> {
        if let Some(log) = &self.log {
            log.record(&self.name);
        }
        Err(LoadError::Failed(self.message.clone()))
    }

    fn references(&self, path: &[String]) -> Vec<Reference> {
        vec![Reference::with_identifier(&self.name, join_path(path))]
    }
}

/// Async-only wrapper that delays the wrapped loader.
#[derive(Debug, Clone)]
pub struct AsyncOnlyLoader {
    inner: Arc<dyn Loader>,
    delay: Duration,
}

impl AsyncOnlyLoader {
    pub fn new(inner: impl Loader + 'static, delay: Duration) -> Self {
        Self {
            inner: Arc::new(inner),
            delay,
        }
    }
}

#[async_trait]
impl Loader for AsyncOnlyLoader {
    fn name(&self) -> String {
        self.inner.name()
    }

    fn supports_blocking(&self) -> bool {
        false
    }

    fn load_blocking(&self) -> Result<Fragment, LoadError> {
        Err(LoadError::Unsupported(self.name()))
    }

    async fn load(&self) -> Result<Fragment, LoadError> {
        tokio::time::sleep(self.delay).await;
        self.inner.load().await
    }

    fn references(&self, path: &[String]) -> Vec<Reference> {
        self.inner.references(path)
    }
}

/// Loader reporting several references per path while returning a plain value.
#[derive(Debug, Clone)]
pub struct CompoundStubLoader {
    name: String,
    value: Value,
    sources: Vec<String>,
}

impl CompoundStubLoader {
    pub fn new(name: &str, value: Value, sources: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            value,
            sources: sources.iter().map(|source| source.to_string()).collect(),
        }
    }
}

#[async_trait]
impl Loader for CompoundStubLoader {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn load_blocking(&self) -> Result<Fragment, LoadError> {
        Ok(Fragment::Value(self.value.clone()))
    }

    fn references(&self, path: &[String]) -> Vec<Reference> {
        self.sources
            .iter()
            .map(|source| Reference::with_identifier(source, join_path(path)))
            .collect()
    }
}
