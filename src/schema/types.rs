//! Schema fragment definitions
//!
//! Supported types:
//! - string: JSON string, no coercion
//! - integer: anything that reads as a base-10 integer
//! - object: closed set of properties with a required subset
//! - array: homogeneous elements, nested to any depth
//!
//! Fragments deserialize from the OpenAPI-style shape
//! `{"type": ..., "items": ..., "required": [...], "properties": {...}}`.
//! The `type` tag alone picks the variant.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use super::errors::{SchemaError, SchemaResult};

/// Leaf type of a primitive fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// JSON string
    String,
    /// Base-10 integer, as a number or a numeric string
    Integer,
    /// Any other declared type name. Never validates.
    Unrecognized(String),
}

impl PrimitiveKind {
    fn from_name(name: &str) -> Self {
        match name {
            "string" => PrimitiveKind::String,
            "integer" => PrimitiveKind::Integer,
            other => PrimitiveKind::Unrecognized(other.to_string()),
        }
    }
}

/// Object fragment: a closed property set plus the names that must be present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectSchema {
    /// Field names that must appear in the value
    pub required: Vec<String>,
    /// Every field the value may carry
    pub properties: HashMap<String, SchemaFragment>,
}

impl ObjectSchema {
    /// Create an object schema with no properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a required property.
    pub fn required(mut self, name: impl Into<String>, schema: SchemaFragment) -> Self {
        let name = name.into();
        self.required.push(name.clone());
        self.properties.insert(name, schema);
        self
    }

    /// Declare an optional property.
    pub fn optional(mut self, name: impl Into<String>, schema: SchemaFragment) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }
}

/// A node of the declarative type description tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawFragment")]
pub enum SchemaFragment {
    /// Leaf type
    Primitive(PrimitiveKind),
    /// Nested object with its own property schemas
    Object(ObjectSchema),
    /// Homogeneous array; the element fragment may be another array
    Array(Box<SchemaFragment>),
}

impl SchemaFragment {
    /// `{"type": "string"}`
    pub fn string() -> Self {
        SchemaFragment::Primitive(PrimitiveKind::String)
    }

    /// `{"type": "integer"}`
    pub fn integer() -> Self {
        SchemaFragment::Primitive(PrimitiveKind::Integer)
    }

    /// `{"type": "array", "items": items}`
    pub fn array(items: SchemaFragment) -> Self {
        SchemaFragment::Array(Box::new(items))
    }

    /// `{"type": "object", ...}`
    pub fn object(schema: ObjectSchema) -> Self {
        SchemaFragment::Object(schema)
    }

    /// Parse a fragment from an already-decoded JSON value.
    pub fn from_value(value: Value) -> SchemaResult<Self> {
        serde_json::from_value(value).map_err(|e| SchemaError::Malformed(e.to_string()))
    }

    /// Returns the type name as written in rule files
    pub fn type_name(&self) -> &str {
        match self {
            SchemaFragment::Primitive(PrimitiveKind::String) => "string",
            SchemaFragment::Primitive(PrimitiveKind::Integer) => "integer",
            SchemaFragment::Primitive(PrimitiveKind::Unrecognized(name)) => name,
            SchemaFragment::Object(_) => "object",
            SchemaFragment::Array(_) => "array",
        }
    }
}

/// Wire shape of a fragment before the type tag is resolved.
#[derive(Deserialize)]
struct RawFragment {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    items: Option<Value>,
    #[serde(default)]
    required: Vec<String>,
    #[serde(default)]
    properties: HashMap<String, SchemaFragment>,
}

impl TryFrom<RawFragment> for SchemaFragment {
    type Error = SchemaError;

    fn try_from(raw: RawFragment) -> Result<Self, Self::Error> {
        let kind = raw.kind.ok_or(SchemaError::MissingType)?;

        match kind.as_str() {
            "array" => {
                let items = match raw.items {
                    Some(Value::String(name)) => return Err(SchemaError::BareItems(name)),
                    Some(items) => SchemaFragment::from_value(items)?,
                    None => return Err(SchemaError::MissingItems),
                };
                Ok(SchemaFragment::array(items))
            }
            "object" => Ok(SchemaFragment::Object(ObjectSchema {
                required: raw.required,
                properties: raw.properties,
            })),
            other => Ok(SchemaFragment::Primitive(PrimitiveKind::from_name(other))),
        }
    }
}
