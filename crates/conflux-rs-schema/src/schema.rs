//! Declarative schema nodes.

use conflux_rs_core::PathMetadata;
use serde_json::Value;

/// Shape expected at one node of the configuration tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    /// Any value, passed through unchanged.
    Any,
    /// A string.
    String,
    /// An integer, optionally bounded.
    Integer { min: Option<f64>, max: Option<f64> },
    /// Any number, optionally bounded.
    Number { min: Option<f64>, max: Option<f64> },
    /// A boolean.
    Boolean,
    /// An array whose elements all match the item schema.
    Array(Box<Schema>),
    /// An object with declared fields.
    Object {
        fields: Vec<(String, Schema)>,
        allow_unknown: bool,
    },
}

/// A schema node plus its modifiers.
///
/// ```
/// use conflux_rs_schema::Schema;
///
/// let schema = Schema::object()
///     .field("port", Schema::integer().min(1).max(65535).default(8080))
///     .field("db", Schema::object().field("user", Schema::string().required()));
/// assert_eq!(schema.metadata().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    kind: SchemaKind,
    required: bool,
    default: Option<Value>,
    description: Option<String>,
}

impl Schema {
    fn with_kind(kind: SchemaKind) -> Self {
        Self {
            kind,
            required: false,
            default: None,
            description: None,
        }
    }

    pub fn any() -> Self {
        Self::with_kind(SchemaKind::Any)
    }

    pub fn string() -> Self {
        Self::with_kind(SchemaKind::String)
    }

    pub fn integer() -> Self {
        Self::with_kind(SchemaKind::Integer {
            min: None,
            max: None,
        })
    }

    pub fn number() -> Self {
        Self::with_kind(SchemaKind::Number {
            min: None,
            max: None,
        })
    }

    pub fn boolean() -> Self {
        Self::with_kind(SchemaKind::Boolean)
    }

    pub fn array(item: Schema) -> Self {
        Self::with_kind(SchemaKind::Array(Box::new(item)))
    }

    /// An object with no fields yet; add them with [`Schema::field`].
    pub fn object() -> Self {
        Self::with_kind(SchemaKind::Object {
            fields: Vec::new(),
            allow_unknown: false,
        })
    }

    /// Declare a field. Ignored on non-object schemas.
    pub fn field(mut self, name: impl Into<String>, schema: Schema) -> Self {
        if let SchemaKind::Object { fields, .. } = &mut self.kind {
            let name = name.into();
            fields.retain(|(existing, _)| existing != &name);
            fields.push((name, schema));
        }
        self
    }

    /// Keep undeclared keys instead of rejecting them.
    pub fn allow_unknown_keys(mut self) -> Self {
        if let SchemaKind::Object { allow_unknown, .. } = &mut self.kind {
            *allow_unknown = true;
        }
        self
    }

    /// The value must be supplied unless a default exists.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Value used when nothing is supplied.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Inclusive lower bound for integer and number schemas.
    pub fn min(mut self, bound: impl Into<f64>) -> Self {
        match &mut self.kind {
            SchemaKind::Integer { min, .. } | SchemaKind::Number { min, .. } => {
                *min = Some(bound.into());
            }
            _ => {}
        }
        self
    }

    /// Inclusive upper bound for integer and number schemas.
    pub fn max(mut self, bound: impl Into<f64>) -> Self {
        match &mut self.kind {
            SchemaKind::Integer { max, .. } | SchemaKind::Number { max, .. } => {
                *max = Some(bound.into());
            }
            _ => {}
        }
        self
    }

    pub fn kind(&self) -> &SchemaKind {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Every leaf path of the schema, depth first in declaration order.
    ///
    /// Arrays and `any` nodes count as leaves. A leaf is reported as
    /// required only when it is required and has no default.
    pub fn metadata(&self) -> Vec<PathMetadata> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        collect_leaves(self, &mut path, &mut out);
        out
    }
}

fn collect_leaves(schema: &Schema, path: &mut Vec<String>, out: &mut Vec<PathMetadata>) {
    match &schema.kind {
        SchemaKind::Object { fields, .. } => {
            for (name, child) in fields {
                path.push(name.clone());
                collect_leaves(child, path, out);
                path.pop();
            }
        }
        _ if path.is_empty() => {}
        _ => out.push(PathMetadata {
            path: path.clone(),
            description: schema.description.clone(),
            required: schema.required && schema.default.is_none(),
        }),
    }
}
