//! Error types for loading, validation, and resolution.

use crate::path::join_path;
use crate::reference::Reference;
use std::fmt;
use thiserror::Error;

/// Errors returned by loaders.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading a source failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The source does not exist.
    #[error("source not found: {0}")]
    NotFound(String),
    /// Parsing a source failed.
    #[error("failed to parse {origin}: {message}")]
    Parse { origin: String, message: String },
    /// Converting JSON values failed.
    #[error("failed to decode value: {0}")]
    Decode(#[from] serde_json::Error),
    /// The loader only supports asynchronous loading.
    #[error("blocking load is not supported by {0}")]
    Unsupported(String),
    /// Loader-specific failure.
    #[error("load failed: {0}")]
    Failed(String),
}

/// Category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationKind {
    /// Failure not tied to a specific path.
    Generic,
    /// A present value violates a constraint.
    InvalidValue,
    /// A required value is absent.
    UndefinedValue,
}

/// Structured validation failure raised by a model.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Human readable failure description.
    pub message: String,
    /// Path of the failing value, if known.
    pub path: Option<Vec<String>>,
    /// Whether the value was missing or invalid.
    pub kind: ValidationKind,
}

impl ValidationError {
    /// A required value is absent at `path`.
    pub fn undefined(message: impl Into<String>, path: Vec<String>) -> Self {
        Self {
            message: message.into(),
            path: Some(path),
            kind: ValidationKind::UndefinedValue,
        }
    }

    /// The value at `path` violates a constraint.
    pub fn invalid(message: impl Into<String>, path: Vec<String>) -> Self {
        Self {
            message: message.into(),
            path: Some(path),
            kind: ValidationKind::InvalidValue,
        }
    }

    /// A failure that cannot be attributed to a path.
    pub fn generic(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            kind: ValidationKind::Generic,
        }
    }

    /// Whether this failure reports a missing value.
    pub fn is_undefined(&self) -> bool {
        self.kind == ValidationKind::UndefinedValue
    }
}

/// Errors returned by models.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Structured validation failure.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Decoding the validated value into the output type failed.
    #[error("failed to decode config: {0}")]
    Decode(#[from] serde_json::Error),
    /// The model only supports asynchronous validation.
    #[error("blocking validation is not supported by {0}")]
    Unsupported(String),
    /// Model-specific failure.
    #[error("validation failed: {0}")]
    Failed(String),
}

/// Errors raised while attributing a path to its source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    /// A loader reported several references for one path inside a basic container.
    #[error(
        "loader {loader} reported {count} references for {path}; compound loaders must provide a merged container"
    )]
    CompoundLoader {
        loader: String,
        path: String,
        count: usize,
    },
}

/// Component that observed a resolution failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reporter {
    /// A loader, by registration index and name.
    Loader { index: usize, name: String },
    /// The model.
    Model { name: String },
}

impl fmt::Display for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reporter::Loader { index, name } => write!(f, "loader #{index} ({name})"),
            Reporter::Model { name } => write!(f, "model ({name})"),
        }
    }
}

/// Underlying failure wrapped by a [`ResolverError`].
#[derive(Debug, Error)]
pub enum ResolverCause {
    /// A loader failed.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// The model rejected the merged value.
    #[error(transparent)]
    Model(#[from] ModelError),
    /// Provenance lookup failed.
    #[error(transparent)]
    Container(#[from] ContainerError),
    /// The resolver was assembled from incompatible components.
    #[error("{0}")]
    Configuration(String),
}

/// The only error returned by a resolver.
///
/// Carries the failing path and every [`Reference`] where the value should be
/// supplied or corrected.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ResolverError {
    message: String,
    #[source]
    cause: ResolverCause,
    reporter: Option<Reporter>,
    path: Option<Vec<String>>,
    references: Vec<Reference>,
}

impl ResolverError {
    pub(crate) fn loader_failed(index: usize, name: String, error: LoadError) -> Self {
        Self {
            message: format!("failed to load configuration from {name}: {error}"),
            cause: ResolverCause::Load(error),
            reporter: Some(Reporter::Loader { index, name }),
            path: None,
            references: Vec::new(),
        }
    }

    pub(crate) fn model_failed(
        name: String,
        error: ModelError,
        path: Option<Vec<String>>,
        references: Vec<Reference>,
    ) -> Self {
        let message = match (&error, &path) {
            (ModelError::Validation(validation), Some(path)) if validation.is_undefined() => {
                format!(
                    "missing configuration value at {}: {}",
                    join_path(path),
                    validation.message
                )
            }
            (ModelError::Validation(validation), Some(path)) => format!(
                "invalid configuration value at {}: {}",
                join_path(path),
                validation.message
            ),
            _ => format!("configuration rejected by {name}: {error}"),
        };
        Self {
            message,
            cause: ResolverCause::Model(error),
            reporter: Some(Reporter::Model { name }),
            path,
            references,
        }
    }

    pub(crate) fn container_failed(error: ContainerError, path: Vec<String>) -> Self {
        Self {
            message: format!(
                "failed to attribute {} to a source: {error}",
                join_path(&path)
            ),
            cause: ResolverCause::Container(error),
            reporter: None,
            path: Some(path),
            references: Vec::new(),
        }
    }

    pub(crate) fn configuration(message: String) -> Self {
        Self {
            message: message.clone(),
            cause: ResolverCause::Configuration(message),
            reporter: None,
            path: None,
            references: Vec::new(),
        }
    }

    /// Summary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The wrapped loader, model, or container failure.
    pub fn cause(&self) -> &ResolverCause {
        &self.cause
    }

    /// Consume the error and return the wrapped failure.
    pub fn into_cause(self) -> ResolverCause {
        self.cause
    }

    /// Component that observed the failure.
    pub fn reporter(&self) -> Option<&Reporter> {
        self.reporter.as_ref()
    }

    /// Path of the failing value, when the failure names one.
    pub fn path(&self) -> Option<&[String]> {
        self.path.as_deref()
    }

    /// Sources where the failing value should be supplied or corrected.
    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    /// Whether the failure is a missing required value.
    pub fn is_undefined_error(&self) -> bool {
        matches!(
            &self.cause,
            ResolverCause::Model(ModelError::Validation(validation)) if validation.is_undefined()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::path_of;
    use pretty_assertions::assert_eq;
    use std::error::Error as _;

    #[test]
    fn undefined_flag_follows_validation_kind() {
        let missing = ResolverError::model_failed(
            "schema".to_string(),
            ValidationError::undefined("required", path_of(&["db", "user"])).into(),
            Some(path_of(&["db", "user"])),
            Vec::new(),
        );
        assert!(missing.is_undefined_error());
        assert_eq!(
            missing.message(),
            "missing configuration value at db.user: required"
        );

        let invalid = ResolverError::model_failed(
            "schema".to_string(),
            ValidationError::invalid("too small", path_of(&["port"])).into(),
            Some(path_of(&["port"])),
            Vec::new(),
        );
        assert!(!invalid.is_undefined_error());
    }

    #[test]
    fn loader_failure_exposes_source_error() {
        let err = ResolverError::loader_failed(
            2,
            "config.yaml".to_string(),
            LoadError::NotFound("config.yaml".to_string()),
        );
        assert_eq!(
            err.reporter(),
            Some(&Reporter::Loader {
                index: 2,
                name: "config.yaml".to_string()
            })
        );
        assert!(err.source().is_some());
        assert!(!err.is_undefined_error());
        assert_eq!(err.path(), None);
    }
}
