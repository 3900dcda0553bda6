//! Containers pairing a configuration value with provenance lookup.
//!
//! A [`BasicContainer`] is backed by exactly one loader. A [`MergedContainer`]
//! deep-merges an ordered list of containers and attributes each path to the
//! child whose own value supplies it.

mod merge;

pub use merge::merge_values;

use crate::error::ContainerError;
use crate::loader::Loader;
use crate::path::{is_defined, join_path};
use crate::reference::Reference;
use log::debug;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// A configuration value plus the ability to say where each path came from.
pub trait DataContainer: Send + Sync + fmt::Debug {
    /// The (possibly merged) configuration value.
    fn value(&self) -> &Value;

    /// Reference attributable to `path`, or `None` if nothing defines it.
    fn definition(&self, path: &[String]) -> Result<Option<Reference>, ContainerError>;
}

/// Container backed by a single loader.
#[derive(Debug, Clone)]
pub struct BasicContainer {
    value: Value,
    loader: Arc<dyn Loader>,
}

impl BasicContainer {
    /// Wrap a value produced by `loader`.
    pub fn new(value: Value, loader: Arc<dyn Loader>) -> Self {
        Self { value, loader }
    }

    /// Loader backing this container.
    pub fn loader(&self) -> &Arc<dyn Loader> {
        &self.loader
    }
}

impl DataContainer for BasicContainer {
    fn value(&self) -> &Value {
        &self.value
    }

    /// Ask the backing loader for paths this value defines; more than one
    /// answer means the loader is compound and should have produced a merged
    /// container itself.
    fn definition(&self, path: &[String]) -> Result<Option<Reference>, ContainerError> {
        if !is_defined(&self.value, path) {
            return Ok(None);
        }
        let mut references = self.loader.references(path);
        match references.len() {
            0 => Ok(None),
            1 => Ok(references.pop()),
            count => Err(ContainerError::CompoundLoader {
                loader: self.loader.name(),
                path: join_path(path),
                count,
            }),
        }
    }
}

/// Container composed of several containers, later ones winning.
#[derive(Debug, Clone)]
pub struct MergedContainer {
    children: Vec<Arc<dyn DataContainer>>,
    value: Value,
}

impl MergedContainer {
    /// Merge `children` in order; the merged value is computed once here.
    pub fn new(children: Vec<Arc<dyn DataContainer>>) -> Self {
        let mut value = Value::Object(Map::new());
        for child in &children {
            merge_values(&mut value, child.value());
        }
        debug!("merged config containers (count={})", children.len());
        Self { children, value }
    }

    /// Child containers in registration order.
    pub fn children(&self) -> &[Arc<dyn DataContainer>] {
        &self.children
    }
}

impl DataContainer for MergedContainer {
    fn value(&self) -> &Value {
        &self.value
    }

    fn definition(&self, path: &[String]) -> Result<Option<Reference>, ContainerError> {
        // A later scalar may have replaced the subtree holding `path`.
        if !is_defined(&self.value, path) {
            return Ok(None);
        }
        for child in self.children.iter().rev() {
            if is_defined(child.value(), path) {
                return child.definition(path);
            }
        }
        Ok(None)
    }
}
