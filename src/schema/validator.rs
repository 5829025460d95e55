//! Structural validation of JSON values against schema fragments
//!
//! Validation semantics:
//! - Required fields are present (by key membership, a `null` value counts)
//! - No undeclared fields exist
//! - Declared fields that are present match their sub-schema
//! - Array elements all match the element fragment, at any depth
//!
//! Validation is pure: no coercion, no mutation, no allocation of results.
//! Every mismatch is reported as `false`.

use serde_json::{Map, Value};
use std::collections::HashMap;

use super::types::{ObjectSchema, PrimitiveKind, SchemaFragment};

/// Returns whether `value` conforms to `schema`.
pub fn validate(schema: &SchemaFragment, value: &Value) -> bool {
    match schema {
        SchemaFragment::Primitive(kind) => validate_primitive(kind, value),
        SchemaFragment::Array(items) => validate_array(items, value),
        SchemaFragment::Object(object) => validate_object(object, value),
    }
}

fn validate_primitive(kind: &PrimitiveKind, value: &Value) -> bool {
    match kind {
        PrimitiveKind::String => value.is_string(),
        PrimitiveKind::Integer => is_integer_like(value),
        PrimitiveKind::Unrecognized(_) => false,
    }
}

fn validate_array(items: &SchemaFragment, value: &Value) -> bool {
    match value.as_array() {
        Some(elements) => elements.iter().all(|element| validate(items, element)),
        None => false,
    }
}

fn validate_object(schema: &ObjectSchema, value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };

    if !has_props(&schema.required, obj) {
        return false;
    }

    if has_extraneous_props(&schema.properties, obj) {
        return false;
    }

    // Absent optional properties are skipped, not checked against a missing value.
    schema.properties.iter().all(|(name, sub_schema)| match obj.get(name) {
        Some(field) => validate(sub_schema, field),
        None => true,
    })
}

/// Returns whether every name in `props` is a key of `obj`.
pub fn has_props(props: &[String], obj: &Map<String, Value>) -> bool {
    props.iter().all(|prop| obj.contains_key(prop))
}

/// Returns whether `obj` carries any key not declared in `properties`.
pub fn has_extraneous_props(
    properties: &HashMap<String, SchemaFragment>,
    obj: &Map<String, Value>,
) -> bool {
    obj.keys().any(|key| !properties.contains_key(key))
}

/// Returns whether the value reads as a base-10 integer.
///
/// Integral numbers pass (`2.0` included). Strings pass when their trimmed
/// content is an optional sign followed by ASCII digits, so query-string
/// values such as `"50"` are accepted. Everything else fails.
///
/// This is stricter than a leading-digits parse in the style of JavaScript
/// `parseInt`: `"12px"`, `"1.5"` and `1.5` are all rejected here.
pub fn is_integer_like(value: &Value) -> bool {
    match value {
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                return true;
            }
            n.as_f64()
                .map_or(false, |f| f.is_finite() && f.fract() == 0.0)
        }
        Value::String(s) => is_integer_literal(s),
        _ => false,
    }
}

fn is_integer_literal(s: &str) -> bool {
    let trimmed = s.trim();
    let digits = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed);

    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Returns the JSON type name of a value, for log lines.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "number"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
