//! Observability for routeguard
//!
//! - Structured logs through `tracing`
//! - Level set by verbosity flag, overridable with `RUST_LOG`
//! - Optional JSON output, one event per line

mod logging;

pub use logging::{init_logging, level_for_verbosity, LogFormat};
