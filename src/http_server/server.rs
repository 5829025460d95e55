//! # HTTP Server
//!
//! Validation gateway. Every request passes through the rule check; requests
//! that survive it reach either `/health` or the fallback, which reports
//! them as accepted.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{middleware, Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::rules::RuleTable;

use super::config::ServerConfig;
use super::middleware::{validate_request, GuardState};

/// HTTP server that validates every request against a rule table
pub struct GuardServer {
    config: ServerConfig,
    router: Router,
}

impl GuardServer {
    /// Create a server for an already-loaded rule table
    pub fn new(config: ServerConfig, table: RuleTable) -> Self {
        let router = Self::build_router(&config, Arc::new(table));
        Self { config, router }
    }

    fn build_router(config: &ServerConfig, table: Arc<RuleTable>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        let app = Router::new()
            .route("/health", get(health_handler))
            .fallback(accepted_handler);

        guard(app, GuardState::new(table, config.body_limit_bytes))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "routeguard listening");

        axum::serve(listener, self.router).await?;
        Ok(())
    }
}

/// Puts the validation layer in front of every route of `router`.
pub fn guard(router: Router, state: GuardState) -> Router {
    router.layer(middleware::from_fn_with_state(state, validate_request))
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// Response for requests that passed validation
#[derive(Debug, Serialize)]
pub struct AcceptedResponse {
    pub status: String,
    pub method: String,
    pub path: String,
}

async fn accepted_handler(method: Method, uri: Uri) -> impl IntoResponse {
    let response = AcceptedResponse {
        status: "accepted".to_string(),
        method: method.to_string(),
        path: uri.path().to_string(),
    };

    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_creation() {
        let server = GuardServer::new(ServerConfig::default(), RuleTable::new());
        assert_eq!(server.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_server_with_custom_port() {
        let server = GuardServer::new(ServerConfig::with_port(8080), RuleTable::new());
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("ok"));
    }
}
