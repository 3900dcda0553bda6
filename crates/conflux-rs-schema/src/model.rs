//! Models backed by a [`Schema`].

use crate::schema::Schema;
use crate::validate::validate;
use async_trait::async_trait;
use conflux_rs_core::{Model, ModelError, PathMetadata};
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

/// Validates and casts the merged value, returning it untyped.
#[derive(Debug, Clone)]
pub struct SchemaModel {
    schema: Schema,
}

impl SchemaModel {
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

#[async_trait]
impl Model<Value> for SchemaModel {
    fn name(&self) -> String {
        "schema".to_string()
    }

    fn validate_blocking(&self, value: Value) -> Result<Value, ModelError> {
        let value = validate(&self.schema, value)?;
        debug!("schema validation passed");
        Ok(value)
    }

    fn metadata(&self) -> Vec<PathMetadata> {
        self.schema.metadata()
    }
}

/// Validates with a schema, then decodes the cast value into `T`.
pub struct TypedModel<T> {
    inner: SchemaModel,
    _output: PhantomData<fn() -> T>,
}

impl<T> TypedModel<T> {
    pub fn new(schema: Schema) -> Self {
        Self {
            inner: SchemaModel::new(schema),
            _output: PhantomData,
        }
    }

    pub fn schema(&self) -> &Schema {
        self.inner.schema()
    }
}

impl<T> Clone for TypedModel<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _output: PhantomData,
        }
    }
}

impl<T> fmt::Debug for TypedModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedModel")
            .field("schema", self.inner.schema())
            .field("output", &std::any::type_name::<T>())
            .finish()
    }
}

#[async_trait]
impl<T> Model<T> for TypedModel<T>
where
    T: DeserializeOwned + Send + 'static,
{
    fn name(&self) -> String {
        format!("schema<{}>", std::any::type_name::<T>())
    }

    fn validate_blocking(&self, value: Value) -> Result<T, ModelError> {
        let value = self.inner.validate_blocking(value)?;
        Ok(serde_json::from_value(value)?)
    }

    fn metadata(&self) -> Vec<PathMetadata> {
        self.inner.metadata()
    }
}
