//! Source references naming where a configuration value lives or could live.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `(source, identifier)` pair such as `("Environment variables", "DB_USER")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    /// Origin of the value: a file path or a descriptive label.
    pub source: String,
    /// Key within the origin, when one applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl Reference {
    /// Reference to a whole source without a specific key.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            identifier: None,
        }
    }

    /// Reference to a specific key within a source.
    pub fn with_identifier(source: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            identifier: Some(identifier.into()),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.identifier {
            Some(identifier) => write!(f, "{}:{}", self.source, identifier),
            None => write!(f, "{}", self.source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Reference;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_includes_identifier_when_present() {
        let reference = Reference::with_identifier("Environment variables", "DB_USER");
        assert_eq!(reference.to_string(), "Environment variables:DB_USER");
        assert_eq!(Reference::new("defaults").to_string(), "defaults");
    }

    #[test]
    fn serializes_without_missing_identifier() {
        let json = serde_json::to_value(Reference::new("config.json")).expect("json");
        assert_eq!(json, serde_json::json!({ "source": "config.json" }));
    }
}
