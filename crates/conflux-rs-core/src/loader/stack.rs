//! Compound loader presenting several loaders as one.

use super::{Fragment, Loader};
use crate::container::{DataContainer, MergedContainer};
use crate::error::LoadError;
use crate::reference::Reference;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

/// Ordered group of loaders registered under one name.
///
/// Loads every member and yields a merged container, so provenance is still
/// attributed to the member that supplied each path. Because it may report
/// several references for one path, it must never back a basic container.
#[derive(Debug, Clone)]
pub struct LoaderStack {
    name: String,
    loaders: Vec<Arc<dyn Loader>>,
}

impl LoaderStack {
    /// Create an empty stack.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            loaders: Vec::new(),
        }
    }

    /// Append a member; later members win.
    pub fn with(mut self, loader: impl Loader + 'static) -> Self {
        self.loaders.push(Arc::new(loader));
        self
    }

    /// Append an already shared member.
    pub fn with_shared(mut self, loader: Arc<dyn Loader>) -> Self {
        self.loaders.push(loader);
        self
    }

    /// Members in registration order.
    pub fn loaders(&self) -> &[Arc<dyn Loader>] {
        &self.loaders
    }

    fn merged(&self, children: Vec<Arc<dyn DataContainer>>) -> Fragment {
        debug!(
            "loaded loader stack (name={}, members={})",
            self.name,
            children.len()
        );
        Fragment::Container(Arc::new(MergedContainer::new(children)))
    }
}

#[async_trait]
impl Loader for LoaderStack {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn supports_blocking(&self) -> bool {
        self.loaders.iter().all(|loader| loader.supports_blocking())
    }

    fn load_blocking(&self) -> Result<Fragment, LoadError> {
        let children = self
            .loaders
            .iter()
            .map(|loader| Ok(loader.load_blocking()?.into_container(loader)))
            .collect::<Result<Vec<_>, LoadError>>()?;
        Ok(self.merged(children))
    }

    async fn load(&self) -> Result<Fragment, LoadError> {
        let mut children = Vec::with_capacity(self.loaders.len());
        for loader in &self.loaders {
            children.push(loader.load().await?.into_container(loader));
        }
        Ok(self.merged(children))
    }

    fn references(&self, path: &[String]) -> Vec<Reference> {
        self.loaders
            .iter()
            .flat_map(|loader| loader.references(path))
            .collect()
    }
}
