//! Loader for structured config files (JSON5 and YAML).

use crate::io;
use async_trait::async_trait;
use conflux_rs_core::{Fragment, LoadError, Loader, Reference, join_path};
use log::debug;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Supported structured file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// JSON or JSON5, parsed with `json5`.
    Json,
    /// YAML.
    Yaml,
}

impl FileFormat {
    /// Detect the format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" | "json5" => Some(FileFormat::Json),
            "yaml" | "yml" => Some(FileFormat::Yaml),
            _ => None,
        }
    }
}

/// Loads one structured file; every path is attributable to the file itself.
#[derive(Debug, Clone)]
pub struct FileLoader {
    path: PathBuf,
    format: FileFormat,
}

impl FileLoader {
    /// Loader for a file in the given format.
    pub fn new(path: impl AsRef<Path>, format: FileFormat) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            format,
        }
    }

    /// JSON/JSON5 file loader.
    pub fn json(path: impl AsRef<Path>) -> Self {
        Self::new(path, FileFormat::Json)
    }

    /// YAML file loader.
    pub fn yaml(path: impl AsRef<Path>) -> Self {
        Self::new(path, FileFormat::Yaml)
    }

    /// Loader whose format is detected from the extension.
    pub fn detect(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let format = FileFormat::from_path(path)
            .ok_or_else(|| io::parse_error(path, "unsupported config file extension"))?;
        Ok(Self::new(path, format))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, contents: &str) -> Result<Fragment, LoadError> {
        let value: Value = match self.format {
            FileFormat::Json => {
                json5::from_str(contents).map_err(|err| io::parse_error(&self.path, err))?
            }
            FileFormat::Yaml => serde_yaml::from_str(contents)
                .map_err(|err| io::parse_error(&self.path, err))?,
        };
        debug!(
            "loaded config file (format={:?}, path={})",
            self.format,
            self.path.display()
        );
        // An empty YAML document parses to null.
        match value {
            Value::Null => Ok(Fragment::Value(Value::Object(Map::new()))),
            Value::Object(_) => Ok(Fragment::Value(value)),
            _ => Err(io::parse_error(
                &self.path,
                "expected a mapping at the top level",
            )),
        }
    }
}

#[async_trait]
impl Loader for FileLoader {
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
        let source = self.path.display().to_string();
        if path.is_empty() {
            return vec![Reference::new(source)];
        }
        vec![Reference::with_identifier(source, join_path(path))]
    }
}
