//! Rule table load errors
//!
//! All of these are fatal at startup: a process must not serve traffic with
//! a rule table it could not read.

use std::io;

use thiserror::Error;

use crate::schema::SchemaError;

/// Failure to build a rule table.
#[derive(Debug, Error)]
pub enum RulesError {
    /// Rules file could not be read
    #[error("failed to read rules file '{path}': {source}")]
    Io {
        /// File that failed to read
        path: String,
        #[source]
        source: io::Error,
    },

    /// Rules file is not valid JSON or not shaped like a rules document
    #[error("invalid rules document '{path}': {source}")]
    Parse {
        /// File (or `<inline>`) that failed to parse
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// One operation's parameter list could not be decoded
    #[error("invalid rule for {method} {path}: {reason}")]
    InvalidRoute {
        /// Route path
        path: String,
        /// Lowercased HTTP method
        method: String,
        /// What was wrong with it
        reason: String,
    },

    /// A parameter carries a schema that cannot be represented
    #[error("invalid schema for parameter `{name}`: {source}")]
    InvalidSchema {
        /// Parameter name (empty for body parameters)
        name: String,
        #[source]
        source: SchemaError,
    },
}

/// Result type for rule table operations
pub type RulesResult<T> = Result<T, RulesError>;
