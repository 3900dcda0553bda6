//! Maps loader and model failures onto resolver errors with references.

use crate::container::{DataContainer, MergedContainer};
use crate::error::{LoadError, ModelError, ResolverError, ValidationKind};
use crate::loader::Loader;
use crate::path::join_path;
use crate::reference::Reference;
use log::debug;
use std::sync::Arc;

/// Wrap the failure of the loader registered at `index`.
pub(super) fn loader_failure(
    index: usize,
    loader: &Arc<dyn Loader>,
    error: LoadError,
) -> ResolverError {
    debug!(
        "loader failed (index={}, name={}, error={})",
        index,
        loader.name(),
        error
    );
    ResolverError::loader_failed(index, loader.name(), error)
}

/// Wrap a model failure, attaching the references for its path.
///
/// Missing values list every loader that could have supplied the path, in
/// registration order. Invalid values name only the source that actually
/// supplied the effective value.
pub(super) fn model_failure(
    loaders: &[Arc<dyn Loader>],
    merged: &MergedContainer,
    model_name: String,
    error: ModelError,
) -> ResolverError {
    let (path, kind) = match &error {
        ModelError::Validation(validation) => match &validation.path {
            Some(path) => (path.clone(), validation.kind),
            None => return ResolverError::model_failed(model_name, error, None, Vec::new()),
        },
        _ => return ResolverError::model_failed(model_name, error, None, Vec::new()),
    };

    let references: Vec<Reference> = if kind == ValidationKind::UndefinedValue {
        loaders
            .iter()
            .flat_map(|loader| loader.references(&path))
            .collect()
    } else {
        match merged.definition(&path) {
            Ok(reference) => reference.into_iter().collect(),
            Err(err) => return ResolverError::container_failed(err, path),
        }
    };
    debug!(
        "validation failed (kind={:?}, path={}, references={})",
        kind,
        join_path(&path),
        references.len()
    );
    ResolverError::model_failed(model_name, error, Some(path), references)
}
