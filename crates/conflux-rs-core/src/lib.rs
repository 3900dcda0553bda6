//! Resolution core for layered configuration.
//!
//! Loaders produce fragments, containers merge them while remembering where
//! every path came from, and the resolver validates the merged value and maps
//! validation failures back to the sources that should be edited.

pub mod builder;
pub mod container;
pub mod error;
pub mod loader;
pub mod model;
pub mod path;
pub mod reference;
pub mod resolver;

/// Builder that assembles loaders and a model into a resolver.
pub use builder::ConfigBuilder;
/// Value containers with provenance lookup.
pub use container::{BasicContainer, DataContainer, MergedContainer, merge_values};
/// Error types crossing the core boundary.
pub use error::{
    ContainerError, LoadError, ModelError, Reporter, ResolverCause, ResolverError,
    ValidationError, ValidationKind,
};
/// Loader contract and built-in loaders.
pub use loader::{Fragment, Loader, LoaderStack, OptionalLoader, StaticLoader};
/// Model contract and the identity model.
pub use model::{IdentityModel, Model, PathMetadata};
/// Path helpers.
pub use path::{join_path, lookup, path_of};
/// Source references.
pub use reference::Reference;
/// Async and blocking resolvers.
pub use resolver::{BlockingResolver, Resolver, ResolverOptions};
