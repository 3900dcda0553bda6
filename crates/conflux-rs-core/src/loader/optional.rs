//! Loader decorator that turns failures into an empty fragment.

use super::{Fragment, Loader};
use crate::error::LoadError;
use crate::reference::Reference;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

/// Wraps a loader whose source may legitimately be absent.
///
/// Any failure of the wrapped loader yields an empty object. References are
/// still delegated, since an optional source remains a valid place to put a
/// value.
///
/// The one exception is [`LoadError::Unsupported`], which is returned as is:
/// it means the loader was called in a mode it does not support. The
/// resolvers check capabilities when they are built, so they never hit it.
#[derive(Debug, Clone)]
pub struct OptionalLoader {
    inner: Arc<dyn Loader>,
}

impl OptionalLoader {
    /// Wrap `inner`.
    pub fn new(inner: impl Loader + 'static) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Wrap an already shared loader.
    pub fn from_shared(inner: Arc<dyn Loader>) -> Self {
        Self { inner }
    }

    fn recover(&self, result: Result<Fragment, LoadError>) -> Result<Fragment, LoadError> {
        match result {
            Ok(fragment) => Ok(fragment),
            // Calling the wrong mode is a wiring bug, not a missing source.
            Err(err @ LoadError::Unsupported(_)) => Err(err),
            Err(err) => {
                debug!(
                    "optional loader skipped (name={}, reason={})",
                    self.inner.name(),
                    err
                );
                Ok(Fragment::empty())
            }
        }
    }
}

#[async_trait]
impl Loader for OptionalLoader {
    fn name(&self) -> String {
        format!("optional {}", self.inner.name())
    }

    fn supports_blocking(&self) -> bool {
        self.inner.supports_blocking()
    }

    fn load_blocking(&self) -> Result<Fragment, LoadError> {
        self.recover(self.inner.load_blocking())
    }

    async fn load(&self) -> Result<Fragment, LoadError> {
        let result = self.inner.load().await;
        self.recover(result)
    }

    fn references(&self, path: &[String]) -> Vec<Reference> {
        self.inner.references(path)
    }
}
