//! Resolution pipeline: load, merge, validate, and decorate failures.
//!
//! Every `resolve` call builds its containers locally, so a resolver can be
//! shared across tasks and threads and invoked concurrently.

mod decorate;


use crate::container::{DataContainer, MergedContainer};
use crate::error::ResolverError;
use crate::loader::Loader;
use crate::model::{IdentityModel, Model};
use futures_util::future::join_all;
use log::{debug, info};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Options for the asynchronous resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Run loaders concurrently instead of one after another.
    ///
    /// Results are still merged in registration order, and when several
    /// loaders fail the lowest-indexed failure is reported. Sequential
    /// loading never invokes loaders after the first failure.
    pub concurrent_loading: bool,
}

/// Asynchronous resolver over an ordered list of loaders and one model.
pub struct Resolver<T: Send + 'static> {
    loaders: Vec<Arc<dyn Loader>>,
    model: Arc<dyn Model<T>>,
    options: ResolverOptions,
}

impl Resolver<Value> {
    /// Resolver returning the merged value without validation.
    pub fn new(loaders: Vec<Arc<dyn Loader>>) -> Self {
        Self::with_model(loaders, IdentityModel)
    }
}

impl<T: Send + 'static> Resolver<T> {
    /// Resolver validating the merged value with `model`.
    pub fn with_model(loaders: Vec<Arc<dyn Loader>>, model: impl Model<T> + 'static) -> Self {
        Self::from_parts(loaders, Arc::new(model), ResolverOptions::default())
    }

    /// Resolver from shared parts.
    pub fn from_parts(
        loaders: Vec<Arc<dyn Loader>>,
        model: Arc<dyn Model<T>>,
        options: ResolverOptions,
    ) -> Self {
        Self {
            loaders,
            model,
            options,
        }
    }

    /// Replace the resolver options.
    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Registered loaders, lowest precedence first.
    pub fn loaders(&self) -> &[Arc<dyn Loader>] {
        &self.loaders
    }

    /// Load every source, merge in registration order, and validate.
    pub async fn resolve(&self) -> Result<T, ResolverError> {
        let containers = self.load_all().await?;
        let merged = MergedContainer::new(containers);
        match self.model.validate(merged.value().clone()).await {
            Ok(config) => {
                info!("config resolved (loaders={})", self.loaders.len());
                Ok(config)
            }
            Err(err) => Err(decorate::model_failure(
                &self.loaders,
                &merged,
                self.model.name(),
                err,
            )),
        }
    }

    /// Convert into a blocking resolver, failing if any component is async-only.
    pub fn into_blocking(self) -> Result<BlockingResolver<T>, ResolverError> {
        BlockingResolver::from_parts(self.loaders, self.model)
    }

    async fn load_all(&self) -> Result<Vec<Arc<dyn DataContainer>>, ResolverError> {
        if self.options.concurrent_loading {
            debug!("loading sources concurrently (count={})", self.loaders.len());
            let results = join_all(self.loaders.iter().map(|loader| loader.load())).await;
            return results
                .into_iter()
                .zip(&self.loaders)
                .enumerate()
                .map(|(index, (result, loader))| {
                    result
                        .map(|fragment| fragment.into_container(loader))
                        .map_err(|err| decorate::loader_failure(index, loader, err))
                })
                .collect();
        }

        let mut containers = Vec::with_capacity(self.loaders.len());
        for (index, loader) in self.loaders.iter().enumerate() {
            debug!("loading source (index={}, name={})", index, loader.name());
            let fragment = loader
                .load()
                .await
                .map_err(|err| decorate::loader_failure(index, loader, err))?;
            containers.push(fragment.into_container(loader));
        }
        Ok(containers)
    }
}

impl<T: Send + 'static> fmt::Debug for Resolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("loaders", &self.loaders)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Synchronous resolver; every loader and the model support blocking calls.
pub struct BlockingResolver<T: Send + 'static> {
    loaders: Vec<Arc<dyn Loader>>,
    model: Arc<dyn Model<T>>,
}

impl BlockingResolver<Value> {
    /// Blocking resolver returning the merged value without validation.
    pub fn new(loaders: Vec<Arc<dyn Loader>>) -> Result<Self, ResolverError> {
        Self::with_model(loaders, IdentityModel)
    }
}

impl<T: Send + 'static> BlockingResolver<T> {
    /// Blocking resolver validating with `model`.
    pub fn with_model(
        loaders: Vec<Arc<dyn Loader>>,
        model: impl Model<T> + 'static,
    ) -> Result<Self, ResolverError> {
        Self::from_parts(loaders, Arc::new(model))
    }

    /// Blocking resolver from shared parts.
    ///
    /// Rejects async-only loaders and models here rather than at resolve time.
    pub fn from_parts(
        loaders: Vec<Arc<dyn Loader>>,
        model: Arc<dyn Model<T>>,
    ) -> Result<Self, ResolverError> {
        if let Some((index, loader)) = loaders
            .iter()
            .enumerate()
            .find(|(_, loader)| !loader.supports_blocking())
        {
            return Err(ResolverError::configuration(format!(
                "loader #{index} ({}) does not support blocking loads",
                loader.name()
            )));
        }
        if !model.supports_blocking() {
            return Err(ResolverError::configuration(format!(
                "model ({}) does not support blocking validation",
                model.name()
            )));
        }
        Ok(Self { loaders, model })
    }

    /// Registered loaders, lowest precedence first.
    pub fn loaders(&self) -> &[Arc<dyn Loader>] {
        &self.loaders
    }

    /// Load every source in order, merge, and validate.
    pub fn resolve(&self) -> Result<T, ResolverError> {
        let mut containers = Vec::with_capacity(self.loaders.len());
        for (index, loader) in self.loaders.iter().enumerate() {
            debug!("loading source (index={}, name={})", index, loader.name());
            let fragment = loader
                .load_blocking()
                .map_err(|err| decorate::loader_failure(index, loader, err))?;
            containers.push(fragment.into_container(loader));
        }
        let merged = MergedContainer::new(containers);
        match self.model.validate_blocking(merged.value().clone()) {
            Ok(config) => {
                info!("config resolved (loaders={})", self.loaders.len());
                Ok(config)
            }
            Err(err) => Err(decorate::model_failure(
                &self.loaders,
                &merged,
                self.model.name(),
                err,
            )),
        }
    }
}

impl<T: Send + 'static> fmt::Debug for BlockingResolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingResolver")
            .field("loaders", &self.loaders)
            .finish_non_exhaustive()
    }
}
