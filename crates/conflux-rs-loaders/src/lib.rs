//! Concrete loaders for environment variables, dotenv files, and JSON5/YAML
//! files, plus the key mappers translating between paths and flat keys.

mod dotenv;
mod env;
mod ext;
mod file;
mod io;
mod mapper;

/// Dotenv file loader.
pub use dotenv::DotenvLoader;
/// Environment variable loader.
pub use env::{ENV_SOURCE, EnvLoader};
/// Builder extension registering these loaders.
pub use ext::LoaderBuilderExt;
/// Structured file loader.
pub use file::{FileFormat, FileLoader};
/// Key mappers between config paths and flat identifiers.
pub use mapper::{ExplicitMapper, KeyMapper, MetadataMapper, PrefixMapper};
