//! Loader contract and the loaders that need nothing beyond the core.

mod optional;
mod stack;
mod static_value;

pub use optional::OptionalLoader;
pub use stack::LoaderStack;
pub use static_value::StaticLoader;

use crate::container::{BasicContainer, DataContainer};
use crate::error::LoadError;
use crate::reference::Reference;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Output of a loader: a raw value, or a container that already knows the
/// provenance of its paths.
#[derive(Debug, Clone)]
pub enum Fragment {
    /// Plain value; attributed through the producing loader's references.
    Value(Value),
    /// Container built by the loader itself, e.g. by a compound loader.
    Container(Arc<dyn DataContainer>),
}

impl Fragment {
    /// An empty object fragment.
    pub fn empty() -> Self {
        Fragment::Value(Value::Object(Map::new()))
    }

    /// The fragment's value.
    pub fn value(&self) -> &Value {
        match self {
            Fragment::Value(value) => value,
            Fragment::Container(container) => container.value(),
        }
    }

    /// Wrap a plain value in a basic container backed by `loader`.
    pub fn into_container(self, loader: &Arc<dyn Loader>) -> Arc<dyn DataContainer> {
        match self {
            Fragment::Value(value) => Arc::new(BasicContainer::new(value, loader.clone())),
            Fragment::Container(container) => container,
        }
    }
}

impl From<Value> for Fragment {
    fn from(value: Value) -> Self {
        Fragment::Value(value)
    }
}

/// Source of a configuration fragment plus provenance for its keys.
///
/// Loaders are read-only configuration: they may be reused across any number
/// of resolutions and must not keep per-resolution state.
#[async_trait]
pub trait Loader: Send + Sync + fmt::Debug {
    /// Short name used when reporting failures.
    fn name(&self) -> String;

    /// Whether [`Loader::load_blocking`] is supported.
    fn supports_blocking(&self) -> bool {
        true
    }

    /// Load the fragment synchronously.
    fn load_blocking(&self) -> Result<Fragment, LoadError>;

    /// Load the fragment asynchronously.
    async fn load(&self) -> Result<Fragment, LoadError> {
        self.load_blocking()
    }

    /// References naming where `path` could be supplied in this source.
    ///
    /// Depends only on the loader's static configuration, never on loaded
    /// data. An empty result means the loader has no opinion about `path`.
    fn references(&self, path: &[String]) -> Vec<Reference>;
}
