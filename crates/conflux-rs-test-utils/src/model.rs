//! Model doubles.

use async_trait::async_trait;
use conflux_rs_core::{Model, ModelError, PathMetadata, ValidationError};
use serde_json::Value;

/// Model delegating to a closure.
pub struct FnModel<F> {
    validate: F,
    blocking: bool,
    metadata: Vec<PathMetadata>,
}

impl<F> FnModel<F> {
    pub fn new(validate: F) -> Self {
        Self {
            validate,
            blocking: true,
            metadata: Vec::new(),
        }
    }

    /// Model that refuses blocking validation.
    pub fn async_only(validate: F) -> Self {
        Self {
            validate,
            blocking: false,
            metadata: Vec::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: Vec<PathMetadata>) -> Self {
        self.metadata = metadata;
        self
    }
}

#[async_trait]
impl<T, F> Model<T> for FnModel<F>
where
    T: Send + 'static,
    F: Fn(Value) -> Result<T, ModelError> + Send + Sync,
{
    fn name(&self) -> String {
        "fn-model".to_string()
    }

    fn supports_blocking(&self) -> bool {
        self.blocking
    }

    fn validate_blocking(&self, value: Value) -> Result<T, ModelError> {
        if !self.blocking {
            return Err(ModelError::Unsupported(self.name()));
        }
        (self.validate)(value)
    }

    async fn validate(&self, value: Value) -> Result<T, ModelError> {
        (self.validate)(value)
    }

    fn metadata(&self) -> Vec<PathMetadata> {
        self.metadata.clone()
    }
}

/// Model failing every validation.
#[derive(Debug, Clone)]
pub enum FailingModel {
    /// Fail with a structured validation error.
    Validation(ValidationError),
    /// Fail with an unstructured message.
    Message(String),
}

#[async_trait]
impl Model<Value> for FailingModel {
    fn name(&self) -> String {
        "failing-model".to_string()
    }

    fn validate_blocking(&self, _value: Value) -> Result<Value, ModelError> {
        match self {
            FailingModel::Validation(err) => Err(err.clone().into()),
            FailingModel::Message(message) => Err(ModelError::Failed(message.clone())),
        }
    }
}
