//! Validation outcomes
//!
//! Rejections are data. The HTTP boundary decides how to surface them.

use thiserror::Error;

/// Why a request was turned away.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Query parameter not declared for the route
    #[error("`{0}` is not a valid query parameter")]
    UnknownQueryParameter(String),

    /// Declared query parameter whose value fails its schema
    #[error("query parameter `{0}` has an invalid type")]
    InvalidQueryParameterType(String),

    /// The route declares no body but one was sent
    #[error("no request body permitted")]
    BodyNotPermitted,

    /// The body fails the route's body schema
    #[error("request body is invalid")]
    InvalidBody,
}

impl Rejection {
    /// HTTP status the boundary should answer with
    pub fn status(&self) -> u16 {
        400
    }

    /// Stable identifier for log lines
    pub fn kind(&self) -> &'static str {
        match self {
            Rejection::UnknownQueryParameter(_) => "unknown_query_parameter",
            Rejection::InvalidQueryParameterType(_) => "invalid_query_parameter_type",
            Rejection::BodyNotPermitted => "body_not_permitted",
            Rejection::InvalidBody => "invalid_body",
        }
    }
}

/// Result of checking one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Request may continue
    Accepted,
    /// First violation found
    Rejected(Rejection),
}

impl ValidationOutcome {
    /// Whether the request may continue
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted)
    }

    /// Client-facing reason, if rejected
    pub fn reason(&self) -> Option<String> {
        match self {
            ValidationOutcome::Accepted => None,
            ValidationOutcome::Rejected(rejection) => Some(rejection.to_string()),
        }
    }

    /// Converts to a `Result` for callers that propagate with `?`.
    pub fn into_result(self) -> Result<(), Rejection> {
        match self {
            ValidationOutcome::Accepted => Ok(()),
            ValidationOutcome::Rejected(rejection) => Err(rejection),
        }
    }
}

impl From<Rejection> for ValidationOutcome {
    fn from(rejection: Rejection) -> Self {
        ValidationOutcome::Rejected(rejection)
    }
}
