//! Rule dispatcher
//!
//! Looks up the rules for a request's route and runs the structural
//! validator once per query parameter and once for the body.

mod dispatcher;
mod outcome;
mod request;

pub use dispatcher::check_request;
pub use outcome::{Rejection, ValidationOutcome};
pub use request::{is_empty_body, RequestDescriptor};
