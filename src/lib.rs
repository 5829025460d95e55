//! routeguard - Declarative request validation for HTTP routes
//!
//! A rules document maps each route and method to the query parameters and
//! request body it accepts. Requests are checked against it before they
//! reach a handler; the first violation rejects the request with a 400.
//!
//! - [`schema`]: schema fragments and the recursive value check
//! - [`rules`]: the rules document and the per-route lookup table
//! - [`dispatch`]: query and body checks for one request
//! - [`http_server`]: axum middleware and the standalone gateway
//! - [`cli`]: `serve`, `check` and `routes`

pub mod cli;
pub mod dispatch;
pub mod http_server;
pub mod observability;
pub mod rules;
pub mod schema;

pub use dispatch::{check_request, Rejection, RequestDescriptor, ValidationOutcome};
pub use rules::{RuleTable, RulesError};
pub use schema::{validate, SchemaFragment};
