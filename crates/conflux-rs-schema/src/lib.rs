//! Declarative schemas for conflux: casting, defaults, and missing versus
//! invalid classification of configuration values.

pub mod ext;
pub mod model;
pub mod schema;
pub mod validate;

pub use ext::SchemaBuilderExt;
pub use model::{SchemaModel, TypedModel};
pub use schema::{Schema, SchemaKind};
pub use validate::validate;
