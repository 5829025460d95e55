//! Structural type checking for request values
//!
//! A schema fragment is a tagged tree of primitive, object and array nodes.
//! `validate` walks a fragment against a `serde_json::Value` and answers
//! yes or no.
//!
//! # Design Principles
//!
//! - Closed objects: undeclared fields always reject
//! - Required fields checked by key membership
//! - Arrays nest to any depth
//! - No coercion, no mutation, deterministic

mod errors;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaResult};
pub use types::{ObjectSchema, PrimitiveKind, SchemaFragment};
pub use validator::{has_extraneous_props, has_props, is_integer_like, json_type_name, validate};
