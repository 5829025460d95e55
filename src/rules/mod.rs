//! Route rule table
//!
//! Rules are declared in an OpenAPI-style document:
//!
//! ```json
//! {"paths": {"/api/account/search": {"get": {"parameters": [
//!     {"name": "page", "in": "query", "type": "integer"}
//! ]}}}}
//! ```
//!
//! The table is loaded once during startup and shared read-only (behind
//! `Arc`) by every request.

mod errors;
mod loader;
mod types;

pub use errors::{RulesError, RulesResult};
pub use types::{Location, ParameterRule, RouteRule, RuleTable, RulesDocument, HTTP_METHODS};
