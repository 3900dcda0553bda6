//! Builder methods installing schema models.

use crate::model::{SchemaModel, TypedModel};
use crate::schema::Schema;
use conflux_rs_core::ConfigBuilder;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Adds schema-backed models to a [`ConfigBuilder`].
///
/// Call this before `env_for_model` so the environment loader can see the
/// schema's paths.
pub trait SchemaBuilderExt {
    /// Validate with `schema` and resolve to the cast [`Value`].
    fn schema(self, schema: Schema) -> ConfigBuilder<Value>;

    /// Validate with `schema` and decode the result into `U`.
    fn typed<U>(self, schema: Schema) -> ConfigBuilder<U>
    where
        U: DeserializeOwned + Send + 'static;
}

impl<T: Send + 'static> SchemaBuilderExt for ConfigBuilder<T> {
    fn schema(self, schema: Schema) -> ConfigBuilder<Value> {
        self.model(SchemaModel::new(schema))
    }

    fn typed<U>(self, schema: Schema) -> ConfigBuilder<U>
    where
        U: DeserializeOwned + Send + 'static,
    {
        self.model(TypedModel::<U>::new(schema))
    }
}
