//! Builder methods registering the loaders of this crate.

use crate::dotenv::DotenvLoader;
use crate::env::EnvLoader;
use crate::file::FileLoader;
use crate::mapper::{KeyMapper, MetadataMapper};
use conflux_rs_core::ConfigBuilder;
use std::path::Path;
use std::sync::Arc;

/// Adds environment, dotenv, and file sources to a [`ConfigBuilder`].
///
/// Each call registers a loader above everything registered before it.
pub trait LoaderBuilderExt: Sized {
    /// Environment variables recognized by `mapper`.
    fn env(self, mapper: impl KeyMapper + 'static) -> Self;

    /// Environment variables named after the current model's paths.
    ///
    /// Register the model first; without metadata nothing is mapped.
    fn env_for_model(self, prefix: &str) -> Self;

    /// A required dotenv file.
    fn dotenv(self, path: impl AsRef<Path>, mapper: impl KeyMapper + 'static) -> Self;

    /// A dotenv file that may be absent.
    fn optional_dotenv(self, path: impl AsRef<Path>, mapper: impl KeyMapper + 'static) -> Self;

    /// A required JSON/JSON5 file.
    fn json_file(self, path: impl AsRef<Path>) -> Self;

    /// A JSON/JSON5 file that may be absent.
    fn optional_json_file(self, path: impl AsRef<Path>) -> Self;

    /// A required YAML file.
    fn yaml_file(self, path: impl AsRef<Path>) -> Self;

    /// A YAML file that may be absent.
    fn optional_yaml_file(self, path: impl AsRef<Path>) -> Self;
}

impl<T: Send + 'static> LoaderBuilderExt for ConfigBuilder<T> {
    fn env(self, mapper: impl KeyMapper + 'static) -> Self {
        self.loader(EnvLoader::new(mapper))
    }

    fn env_for_model(self, prefix: &str) -> Self {
        let mapper = MetadataMapper::from_metadata(prefix, &self.model_metadata());
        self.loader(EnvLoader::from_shared(Arc::new(mapper)))
    }

    fn dotenv(self, path: impl AsRef<Path>, mapper: impl KeyMapper + 'static) -> Self {
        self.loader(DotenvLoader::new(path, mapper))
    }

    fn optional_dotenv(self, path: impl AsRef<Path>, mapper: impl KeyMapper + 'static) -> Self {
        self.optional(DotenvLoader::new(path, mapper))
    }

    fn json_file(self, path: impl AsRef<Path>) -> Self {
        self.loader(FileLoader::json(path))
    }

    fn optional_json_file(self, path: impl AsRef<Path>) -> Self {
        self.optional(FileLoader::json(path))
    }

    fn yaml_file(self, path: impl AsRef<Path>) -> Self {
        self.loader(FileLoader::yaml(path))
    }

    fn optional_yaml_file(self, path: impl AsRef<Path>) -> Self {
        self.optional(FileLoader::yaml(path))
    }
}
