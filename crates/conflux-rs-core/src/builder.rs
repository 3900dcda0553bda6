//! Explicit builder for assembling a resolver.
//!
//! Capability crates (file and environment loaders, schemas) extend this
//! builder through extension traits that take and return it.

use crate::error::ResolverError;
use crate::loader::{Loader, OptionalLoader, StaticLoader};
use crate::model::{IdentityModel, Model, PathMetadata};
use crate::resolver::{BlockingResolver, Resolver, ResolverOptions};
use log::debug;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Label used for values registered through [`ConfigBuilder::defaults`].
pub const DEFAULTS_SOURCE: &str = "defaults";

/// Collects loaders (lowest precedence first), a model, and resolver options.
pub struct ConfigBuilder<T: Send + 'static> {
    loaders: Vec<Arc<dyn Loader>>,
    model: Arc<dyn Model<T>>,
    options: ResolverOptions,
}

impl ConfigBuilder<Value> {
    /// Start with no loaders and the identity model.
    pub fn new() -> Self {
        Self {
            loaders: Vec::new(),
            model: Arc::new(IdentityModel),
            options: ResolverOptions::default(),
        }
    }
}

impl Default for ConfigBuilder<Value> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> ConfigBuilder<T> {
    /// Register a loader; it overrides every loader registered before it.
    pub fn loader(self, loader: impl Loader + 'static) -> Self {
        self.shared_loader(Arc::new(loader))
    }

    /// Register an already shared loader.
    pub fn shared_loader(mut self, loader: Arc<dyn Loader>) -> Self {
        debug!(
            "registering loader (index={}, name={})",
            self.loaders.len(),
            loader.name()
        );
        self.loaders.push(loader);
        self
    }

    /// Register a loader whose failures are ignored.
    pub fn optional(self, loader: impl Loader + 'static) -> Self {
        self.loader(OptionalLoader::new(loader))
    }

    /// Register static default values.
    pub fn defaults(self, value: Value) -> Self {
        self.loader(StaticLoader::new(DEFAULTS_SOURCE, value))
    }

    /// Replace the model, changing the resolved output type.
    pub fn model<U: Send + 'static>(self, model: impl Model<U> + 'static) -> ConfigBuilder<U> {
        ConfigBuilder {
            loaders: self.loaders,
            model: Arc::new(model),
            options: self.options,
        }
    }

    /// Load sources concurrently in the async resolver.
    pub fn concurrent_loading(mut self, enabled: bool) -> Self {
        self.options.concurrent_loading = enabled;
        self
    }

    /// Registered loaders, lowest precedence first.
    pub fn loaders(&self) -> &[Arc<dyn Loader>] {
        &self.loaders
    }

    /// Path metadata exposed by the current model.
    pub fn model_metadata(&self) -> Vec<PathMetadata> {
        self.model.metadata()
    }

    /// Build an asynchronous resolver.
    pub fn build(self) -> Resolver<T> {
        Resolver::from_parts(self.loaders, self.model, self.options)
    }

    /// Build a blocking resolver, rejecting async-only components.
    pub fn build_blocking(self) -> Result<BlockingResolver<T>, ResolverError> {
        BlockingResolver::from_parts(self.loaders, self.model)
    }
}

impl<T: Send + 'static> fmt::Debug for ConfigBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigBuilder")
            .field("loaders", &self.loaders)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
