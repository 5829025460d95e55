//! Rule dispatch for inbound requests
//!
//! Check order is fixed: query parameters in the order they arrived, then
//! the body. The first violation wins and nothing after it is checked.
//! Routes without rules are not checked at all.

use serde_json::{Map, Value};

use crate::rules::{RouteRule, RuleTable};
use crate::schema::validate;

use super::outcome::{Rejection, ValidationOutcome};
use super::request::RequestDescriptor;

/// Checks a request against the rules declared for its route.
pub fn check_request(request: &RequestDescriptor, table: &RuleTable) -> ValidationOutcome {
    let path = request.full_path();
    let method = request.method.to_ascii_lowercase();

    let Some(route) = table.get(&path, &method) else {
        tracing::debug!(%method, %path, "no rules for route, passing through");
        return ValidationOutcome::Accepted;
    };

    match check_route(route, request) {
        Ok(()) => ValidationOutcome::Accepted,
        Err(rejection) => {
            tracing::warn!(
                %method,
                %path,
                kind = rejection.kind(),
                reason = %rejection,
                "request rejected"
            );
            ValidationOutcome::Rejected(rejection)
        }
    }
}

fn check_route(route: &RouteRule, request: &RequestDescriptor) -> Result<(), Rejection> {
    check_query(route, request)?;
    check_body(route, request)
}

fn check_query(route: &RouteRule, request: &RequestDescriptor) -> Result<(), Rejection> {
    for (name, value) in &request.query {
        let rule = route
            .query_rule(name)
            .ok_or_else(|| Rejection::UnknownQueryParameter(name.clone()))?;

        // A declared parameter without a type accepts nothing.
        let valid = rule
            .schema
            .as_ref()
            .map_or(false, |schema| validate(schema, value));
        if !valid {
            return Err(Rejection::InvalidQueryParameterType(name.clone()));
        }
    }
    Ok(())
}

fn check_body(route: &RouteRule, request: &RequestDescriptor) -> Result<(), Rejection> {
    let Some(schema) = route.body_schema() else {
        return if request.body_is_empty() {
            Ok(())
        } else {
            Err(Rejection::BodyNotPermitted)
        };
    };

    // A missing or null body is checked as `{}`.
    let empty = Value::Object(Map::new());
    let body = match &request.body {
        None | Some(Value::Null) => &empty,
        Some(body) => body,
    };

    if validate(schema, body) {
        Ok(())
    } else {
        Err(Rejection::InvalidBody)
    }
}
