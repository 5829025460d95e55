//! CLI-specific error types
//!
//! Every CLI error ends the process with exit code 1.

use std::fmt;
use std::io;

use crate::http_server::ConfigError;
use crate::rules::RulesError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file or environment error
    ConfigError,
    /// Rules document could not be loaded
    RulesError,
    /// Bad command line value
    InvalidArgument,
    /// Checked request was rejected
    Rejected,
    /// Server failed to start or stopped with an error
    ServerFailed,
    /// I/O error (stdout)
    IoError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "ROUTEGUARD_CONFIG_ERROR",
            Self::RulesError => "ROUTEGUARD_RULES_ERROR",
            Self::InvalidArgument => "ROUTEGUARD_INVALID_ARGUMENT",
            Self::Rejected => "ROUTEGUARD_REJECTED",
            Self::ServerFailed => "ROUTEGUARD_SERVER_FAILED",
            Self::IoError => "ROUTEGUARD_IO_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Invalid argument
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidArgument, msg)
    }

    /// Request rejected by the rules
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::new(CliErrorCode::Rejected, reason)
    }

    /// Server failure
    pub fn server_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ServerFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::new(CliErrorCode::IoError, e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(CliErrorCode::ConfigError, e.to_string())
    }
}

impl From<RulesError> for CliError {
    fn from(e: RulesError) -> Self {
        Self::new(CliErrorCode::RulesError, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
