//! Schema fragment decoding errors
//!
//! Raised only while rule files are loaded. Validation itself never errors.

use thiserror::Error;

/// A schema fragment that cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Fragment has no `type` tag
    #[error("schema fragment has no `type`")]
    MissingType,
    /// Array fragment has no `items`
    #[error("array schema has no `items`")]
    MissingItems,
    /// `items` given as a bare type name instead of a fragment
    #[error("array `items` must be a schema object, found bare type name `{0}`")]
    BareItems(String),
    /// Any other decoding failure
    #[error("malformed schema fragment: {0}")]
    Malformed(String),
}

/// Result type for schema decoding
pub type SchemaResult<T> = Result<T, SchemaError>;
