//! Dispatcher End-to-End Tests
//!
//! Rules loaded from a document on disk, requests checked against them:
//! - Routes without rules pass untouched
//! - Query parameters are checked in arrival order, first failure wins
//! - Query checks run before body checks
//! - Bodies are rejected where no body rule exists

use std::path::Path;

use routeguard::dispatch::{check_request, Rejection, RequestDescriptor, ValidationOutcome};
use routeguard::rules::RuleTable;
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

fn load_fixture() -> RuleTable {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/rules.json");
    RuleTable::load(&path).unwrap()
}

fn rejected(outcome: ValidationOutcome) -> Rejection {
    match outcome {
        ValidationOutcome::Rejected(rejection) => rejection,
        ValidationOutcome::Accepted => panic!("request was accepted"),
    }
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_fixture_declares_three_routes() {
    let table = load_fixture();
    assert_eq!(table.route_count(), 3);
    assert!(table.get("/api/account/search", "GET").is_some());
    assert!(table.get("/api/account/profile", "put").is_some());
    assert!(table.get("/api/account/profile", "get").is_none());
}

// =============================================================================
// Fail-open
// =============================================================================

#[test]
fn test_route_without_rules_passes_anything() {
    let table = load_fixture();
    let request = RequestDescriptor::new("POST", "/api", "/unknown")
        .with_query_param("anything", "goes")
        .with_body(json!({"free": "form"}));

    assert!(check_request(&request, &table).is_accepted());
}

#[test]
fn test_undeclared_method_passes() {
    let table = load_fixture();
    let request = RequestDescriptor::new("DELETE", "/api/account", "/profile")
        .with_body(json!({"anything": 1}));

    assert!(check_request(&request, &table).is_accepted());
}

// =============================================================================
// Query Parameters
// =============================================================================

#[test]
fn test_valid_query_passes() {
    let table = load_fixture();
    let request = RequestDescriptor::new("GET", "/api/account", "/search")
        .with_query_param("page", "50")
        .with_query_param("sort", "name");

    assert_eq!(check_request(&request, &table), ValidationOutcome::Accepted);
}

#[test]
fn test_unknown_query_parameter_is_named() {
    let table = load_fixture();
    let request = RequestDescriptor::new("GET", "/api/account", "/search")
        .with_query_param("limit", "10");

    let rejection = rejected(check_request(&request, &table));
    assert_eq!(rejection, Rejection::UnknownQueryParameter("limit".into()));
    assert_eq!(rejection.to_string(), "`limit` is not a valid query parameter");
    assert_eq!(rejection.status(), 400);
}

#[test]
fn test_query_parameter_with_wrong_type() {
    let table = load_fixture();
    let request = RequestDescriptor::new("GET", "/api/account", "/search")
        .with_query_param("page", "fifty");

    let rejection = rejected(check_request(&request, &table));
    assert_eq!(rejection.to_string(), "query parameter `page` has an invalid type");
}

#[test]
fn test_first_failing_query_parameter_wins() {
    let table = load_fixture();
    let request = RequestDescriptor::new("GET", "/api/account", "/search")
        .with_query_param("page", "x")
        .with_query_param("bogus", "1");

    assert_eq!(
        rejected(check_request(&request, &table)),
        Rejection::InvalidQueryParameterType("page".into())
    );
}

#[test]
fn test_array_query_parameter() {
    let table = load_fixture();
    let ok = RequestDescriptor::new("GET", "/api/account", "/search")
        .with_query_param("ids", json!(["1", "2"]));
    let bad = RequestDescriptor::new("GET", "/api/account", "/search")
        .with_query_param("ids", json!(["1", "two"]));

    assert!(check_request(&ok, &table).is_accepted());
    assert!(!check_request(&bad, &table).is_accepted());
}

#[test]
fn test_route_with_no_parameters_rejects_any_query() {
    let table = load_fixture();
    let request =
        RequestDescriptor::new("GET", "/api/account", "/role").with_query_param("page", "1");

    assert_eq!(
        rejected(check_request(&request, &table)),
        Rejection::UnknownQueryParameter("page".into())
    );
}

// =============================================================================
// Bodies
// =============================================================================

#[test]
fn test_valid_body_passes() {
    let table = load_fixture();
    let request = RequestDescriptor::new("PUT", "/api/account", "/profile").with_body(json!({
        "name": "Ada",
        "job_title": "Engineer",
        "photo_url": "https://example.com/ada.png"
    }));

    assert!(check_request(&request, &table).is_accepted());
}

#[test]
fn test_body_with_extra_field_is_invalid() {
    let table = load_fixture();
    let request = RequestDescriptor::new("PUT", "/api/account", "/profile")
        .with_body(json!({"name": "Ada", "is_admin": true}));

    let rejection = rejected(check_request(&request, &table));
    assert_eq!(rejection, Rejection::InvalidBody);
    assert_eq!(rejection.to_string(), "request body is invalid");
}

#[test]
fn test_missing_body_is_checked_as_empty_object() {
    let table = load_fixture();
    let request = RequestDescriptor::new("PUT", "/api/account", "/profile");

    // `name` is required, so `{}` fails.
    assert_eq!(
        rejected(check_request(&request, &table)),
        Rejection::InvalidBody
    );
}

#[test]
fn test_body_on_route_without_body_rule() {
    let table = load_fixture();
    let with_body = RequestDescriptor::new("GET", "/api/account", "/role")
        .with_body(json!({"role": "admin"}));
    let empty_body = RequestDescriptor::new("GET", "/api/account", "/role").with_body(json!({}));

    let rejection = rejected(check_request(&with_body, &table));
    assert_eq!(rejection, Rejection::BodyNotPermitted);
    assert_eq!(rejection.to_string(), "no request body permitted");
    assert!(check_request(&empty_body, &table).is_accepted());
}

#[test]
fn test_query_checked_before_body() {
    let table = load_fixture();
    let request = RequestDescriptor::new("GET", "/api/account", "/role")
        .with_query_param("x", "1")
        .with_body(json!({"role": "admin"}));

    assert_eq!(
        rejected(check_request(&request, &table)),
        Rejection::UnknownQueryParameter("x".into())
    );
}
