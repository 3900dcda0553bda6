//! Loader for `.env` files.

use crate::io;
use crate::mapper::KeyMapper;
use async_trait::async_trait;
use conflux_rs_core::path::insert_at;
use conflux_rs_core::{Fragment, LoadError, Loader, Reference};
use log::debug;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Parses a dotenv file and keeps the keys a [`KeyMapper`] recognizes.
///
/// The file is read without touching the process environment.
#[derive(Debug, Clone)]
pub struct DotenvLoader {
    path: PathBuf,
    mapper: Arc<dyn KeyMapper>,
}

impl DotenvLoader {
    pub fn new(path: impl AsRef<Path>, mapper: impl KeyMapper + 'static) -> Self {
        Self::from_shared(path, Arc::new(mapper))
    }

    pub fn from_shared(path: impl AsRef<Path>, mapper: Arc<dyn KeyMapper>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            mapper,
        }
    }

    fn parse(&self, contents: &str) -> Result<Fragment, LoadError> {
        let mut root = Value::Object(Map::new());
        let mut matched = 0usize;
        for item in dotenvy::from_read_iter(contents.as_bytes()) {
            let (key, value) = item.map_err(|err| io::parse_error(&self.path, err))?;
            if let Some(path) = self.mapper.path(&key) {
                insert_at(&mut root, &path, Value::String(value));
                matched += 1;
            }
        }
        debug!(
            "loaded dotenv file (path={}, matched={})",
            self.path.display(),
            matched
        );
        Ok(Fragment::Value(root))
    }
}

#[async_trait]
impl Loader for DotenvLoader {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn load_blocking(&self) -> Result<Fragment, LoadError> {
        let contents = io::read_blocking(&self.path)?;
        self.parse(&contents)
    }

    async fn load(&self) -> Result<Fragment, LoadError> {
        let contents = io::read_async(&self.path).await?;
        self.parse(&contents)
    }

    fn references(&self, path: &[String]) -> Vec<Reference> {
        self.mapper
            .identifier(path)
            .map(|identifier| {
                Reference::with_identifier(self.path.display().to_string(), identifier)
            })
            .into_iter()
            .collect()
    }
}
