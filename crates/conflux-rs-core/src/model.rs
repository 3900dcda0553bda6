//! Model contract: validate and cast a merged configuration value.

use crate::error::ModelError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Describes one path a model understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathMetadata {
    /// Path segments.
    pub path: Vec<String>,
    /// Optional human readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether a value must be supplied for this path.
    #[serde(default)]
    pub required: bool,
}

/// Validates an untyped merged value into `T`.
///
/// A missing required value must be reported as
/// [`ValidationKind::UndefinedValue`](crate::ValidationKind::UndefinedValue);
/// every other constraint violation as `InvalidValue`, or `Generic` when no
/// path is known.
#[async_trait]
pub trait Model<T: Send + 'static>: Send + Sync {
    /// Short name used when reporting failures.
    fn name(&self) -> String {
        "model".to_string()
    }

    /// Whether [`Model::validate_blocking`] is supported.
    fn supports_blocking(&self) -> bool {
        true
    }

    /// Validate synchronously.
    fn validate_blocking(&self, value: Value) -> Result<T, ModelError>;

    /// Validate asynchronously.
    async fn validate(&self, value: Value) -> Result<T, ModelError> {
        self.validate_blocking(value)
    }

    /// Every path the model supports, for loaders that synthesize identifiers.
    fn metadata(&self) -> Vec<PathMetadata> {
        Vec::new()
    }
}

/// Model that accepts the merged value unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityModel;

#[async_trait]
impl Model<Value> for IdentityModel {
    fn name(&self) -> String {
        "identity".to_string()
    }

    fn validate_blocking(&self, value: Value) -> Result<Value, ModelError> {
        Ok(value)
    }
}
