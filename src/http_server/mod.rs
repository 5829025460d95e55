//! # HTTP boundary
//!
//! Axum integration for the rule dispatcher.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - everything else - validated, then answered with `{"status": "accepted"}`
//!
//! Rejected requests get a 400 with `{"error": {"msg", "status"}}`.

pub mod config;
pub mod errors;
pub mod extract;
pub mod middleware;
pub mod server;

pub use config::{ConfigError, ConfigResult, ServerConfig};
pub use errors::ApiError;
pub use middleware::{validate_request, GuardState};
pub use server::{guard, GuardServer};
