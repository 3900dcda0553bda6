//! Translation between config paths and flat keys such as env var names.

use conflux_rs_core::PathMetadata;
use heck::ToShoutySnakeCase;
use log::warn;
use std::collections::BTreeMap;
use std::fmt;

/// Maps config paths to flat identifiers and back.
pub trait KeyMapper: Send + Sync + fmt::Debug {
    /// Identifier under which `path` can be supplied, if any.
    fn identifier(&self, path: &[String]) -> Option<String>;

    /// Path addressed by `identifier`, or `None` if the key is not ours.
    fn path(&self, identifier: &str) -> Option<Vec<String>>;
}

/// Maps `["db", "user"]` to `APP_DB__USER` for prefix `APP_`.
///
/// Segments are upper-cased on the way out and lower-cased on the way in, so
/// only lower-case keys round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixMapper {
    prefix: String,
    separator: String,
}

impl PrefixMapper {
    /// Mapper for keys starting with `prefix`, nested with `__`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            separator: "__".to_string(),
        }
    }

    /// Use a different nesting separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl KeyMapper for PrefixMapper {
    fn identifier(&self, path: &[String]) -> Option<String> {
        if path.is_empty() {
            return None;
        }
        let body = path
            .iter()
            .map(|segment| segment.to_uppercase())
            .collect::<Vec<_>>()
            .join(&self.separator);
        Some(format!("{}{}", self.prefix, body))
    }

    fn path(&self, identifier: &str) -> Option<Vec<String>> {
        let rest = identifier.strip_prefix(&self.prefix)?;
        if rest.is_empty() {
            return None;
        }
        let path = rest
            .split(self.separator.as_str())
            .map(|segment| segment.to_lowercase())
            .collect::<Vec<_>>();
        if path.iter().any(|segment| segment.is_empty()) {
            return None;
        }
        Some(path)
    }
}

/// Maps exactly the paths a model declares, e.g. `db.maxConnections` to
/// `APP_DB_MAX_CONNECTIONS`.
#[derive(Debug, Clone, Default)]
pub struct MetadataMapper {
    by_path: BTreeMap<Vec<String>, String>,
    by_identifier: BTreeMap<String, Vec<String>>,
}

impl MetadataMapper {
    /// Build identifiers from model metadata.
    pub fn from_metadata(prefix: &str, metadata: &[PathMetadata]) -> Self {
        let mut mapper = Self::default();
        for entry in metadata {
            if entry.path.is_empty() {
                continue;
            }
            let body = entry
                .path
                .iter()
                .map(|segment| segment.to_shouty_snake_case())
                .collect::<Vec<_>>()
                .join("_");
            let identifier = format!("{prefix}{body}");
            if let Some(existing) = mapper.by_identifier.get(&identifier) {
                warn!(
                    "identifier collision (identifier={}, kept={}, dropped={})",
                    identifier,
                    existing.join("."),
                    entry.path.join(".")
                );
                continue;
            }
            mapper
                .by_path
                .insert(entry.path.clone(), identifier.clone());
            mapper.by_identifier.insert(identifier, entry.path.clone());
        }
        mapper
    }

    /// Number of mapped paths.
    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    /// Whether no paths are mapped.
    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}

impl KeyMapper for MetadataMapper {
    fn identifier(&self, path: &[String]) -> Option<String> {
        self.by_path.get(path).cloned()
    }

    fn path(&self, identifier: &str) -> Option<Vec<String>> {
        self.by_identifier.get(identifier).cloned()
    }
}

/// Hand-written identifier table.
#[derive(Debug, Clone, Default)]
pub struct ExplicitMapper {
    pairs: Vec<(String, Vec<String>)>,
}

impl ExplicitMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `identifier` to `path`.
    pub fn map(mut self, identifier: &str, path: &[&str]) -> Self {
        let path = path.iter().map(|segment| segment.to_string()).collect();
        self.pairs.push((identifier.to_string(), path));
        self
    }
}

impl KeyMapper for ExplicitMapper {
    fn identifier(&self, path: &[String]) -> Option<String> {
        self.pairs
            .iter()
            .find(|(_, candidate)| candidate.as_slice() == path)
            .map(|(identifier, _)| identifier.clone())
    }

    fn path(&self, identifier: &str) -> Option<Vec<String>> {
        self.pairs
            .iter()
            .find(|(candidate, _)| candidate == identifier)
            .map(|(_, path)| path.clone())
    }
}
