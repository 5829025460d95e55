//! Request validation middleware
//!
//! Buffers the body, decodes query and body, runs the dispatcher, and
//! either answers 400 or hands the request on with its body restored.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{OriginalUri, Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::dispatch::{check_request, RequestDescriptor};
use crate::rules::RuleTable;

use super::errors::ApiError;
use super::extract::{parse_body, parse_query};

/// Shared state of the validation layer.
#[derive(Debug, Clone)]
pub struct GuardState {
    /// Rule table loaded at startup
    pub table: Arc<RuleTable>,
    /// Largest body read for validation
    pub body_limit: usize,
}

impl GuardState {
    /// Create state from a loaded table
    pub fn new(table: Arc<RuleTable>, body_limit: usize) -> Self {
        Self { table, body_limit }
    }
}

/// Axum middleware: rejects requests that break their route's rules.
pub async fn validate_request(
    State(state): State<GuardState>,
    request: Request,
    next: Next,
) -> Response {
    match check(&state, request).await {
        Ok(request) => next.run(request).await,
        Err(err) => err.into_response(),
    }
}

async fn check(state: &GuardState, request: Request) -> Result<Request, ApiError> {
    let (parts, body) = request.into_parts();

    if let Some(length) = content_length(&parts.headers) {
        if length > state.body_limit {
            return Err(ApiError::PayloadTooLarge(state.body_limit));
        }
    }

    // Nested routers strip their prefix from `uri`; rules are keyed by the full path.
    let path = parts
        .extensions
        .get::<OriginalUri>()
        .map(|uri| uri.0.path().to_string())
        .unwrap_or_else(|| parts.uri.path().to_string());

    let query = parse_query(&parts.uri)?;

    let bytes = axum::body::to_bytes(body, state.body_limit)
        .await
        .map_err(|_| ApiError::PayloadTooLarge(state.body_limit))?;
    let parsed_body = parse_body(&parts.headers, &bytes).await?;

    let mut descriptor =
        RequestDescriptor::new(parts.method.as_str(), "", path).with_query(query);
    if let Some(body) = parsed_body {
        descriptor = descriptor.with_body(body);
    }

    check_request(&descriptor, &state.table).into_result()?;

    Ok(Request::from_parts(parts, Body::from(bytes)))
}

fn content_length(headers: &axum::http::HeaderMap) -> Option<usize> {
    headers
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}
