//! Query string and body decoding
//!
//! Turns raw request parts into the JSON values the dispatcher checks.
//! A key that repeats, or that ends in `[]`, becomes an array of strings.
//! Every other key maps to a single string.

use axum::body::{Body, Bytes};
use axum::extract::{FromRequest, Query};
use axum::http::{header, HeaderMap, Request, Uri};
use axum::Form;
use serde_json::{Map, Value};

use super::errors::ApiError;

const ARRAY_SUFFIX: &str = "[]";

/// Decodes the query string of `uri` into an ordered mapping.
pub fn parse_query(uri: &Uri) -> Result<Map<String, Value>, ApiError> {
    if uri.query().map_or(true, str::is_empty) {
        return Ok(Map::new());
    }

    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri)
        .map_err(|e| ApiError::MalformedQuery(e.body_text()))?;

    Ok(pairs_to_map(pairs))
}

/// Folds decoded `key=value` pairs into a mapping, keeping first-seen order.
pub fn pairs_to_map(pairs: Vec<(String, String)>) -> Map<String, Value> {
    let mut map = Map::new();

    for (key, value) in pairs {
        let (key, forced_array) = match key.strip_suffix(ARRAY_SUFFIX) {
            Some(stripped) => (stripped.to_string(), true),
            None => (key, false),
        };

        match map.get_mut(&key) {
            Some(Value::Array(existing)) => existing.push(Value::String(value)),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, Value::String(value)]);
            }
            None if forced_array => {
                map.insert(key, Value::Array(vec![Value::String(value)]));
            }
            None => {
                map.insert(key, Value::String(value));
            }
        }
    }

    map
}

/// Decodes a buffered body according to its `Content-Type`.
///
/// - empty bytes: no body
/// - JSON types (`application/json`, `*+json`): parsed JSON
/// - `application/x-www-form-urlencoded`: mapping, as for query strings
/// - anything else: the text itself, so it is never mistaken for empty
pub async fn parse_body(headers: &HeaderMap, bytes: &Bytes) -> Result<Option<Value>, ApiError> {
    if bytes.is_empty() {
        return Ok(None);
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();
    let mime = content_type.split(';').next().unwrap_or("").trim();

    if mime == "application/json" || mime.ends_with("+json") {
        let value = serde_json::from_slice(bytes)
            .map_err(|e| ApiError::MalformedBody(e.to_string()))?;
        return Ok(Some(value));
    }

    if mime == "application/x-www-form-urlencoded" {
        let request = Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, mime)
            .body(Body::from(bytes.clone()))
            .map_err(|e| ApiError::MalformedBody(e.to_string()))?;
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(request, &())
            .await
            .map_err(|e| ApiError::MalformedBody(e.body_text()))?;
        return Ok(Some(Value::Object(pairs_to_map(pairs))));
    }

    Ok(Some(Value::String(String::from_utf8_lossy(bytes).into_owned())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::json;

    fn headers(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        headers
    }

    #[test]
    fn test_single_values_stay_strings() {
        let uri: Uri = "/api/account/search?page=50&sort=name".parse().unwrap();
        let query = parse_query(&uri).unwrap();
        assert_eq!(Value::Object(query), json!({"page": "50", "sort": "name"}));
    }

    #[test]
    fn test_repeated_and_bracketed_keys_become_arrays() {
        let uri: Uri = "/x?tag=a&tag=b&ids%5B%5D=1&page=2".parse().unwrap();
        let query = parse_query(&uri).unwrap();
        assert_eq!(query["tag"], json!(["a", "b"]));
        assert_eq!(query["ids"], json!(["1"]));
        assert_eq!(query["page"], json!("2"));

        let keys: Vec<_> = query.keys().cloned().collect();
        assert_eq!(keys, vec!["tag", "ids", "page"]);
    }

    #[test]
    fn test_no_query() {
        let uri: Uri = "/x".parse().unwrap();
        assert!(parse_query(&uri).unwrap().is_empty());

        let uri: Uri = "/x?".parse().unwrap();
        assert!(parse_query(&uri).unwrap().is_empty());
    }

    #[test]
    fn test_percent_decoding() {
        let uri: Uri = "/x?name=alex%20smith".parse().unwrap();
        assert_eq!(parse_query(&uri).unwrap()["name"], json!("alex smith"));
    }

    #[tokio::test]
    async fn test_json_body() {
        let body = Bytes::from_static(br#"{"name": "alex"}"#);
        let parsed = parse_body(&headers("application/json; charset=utf-8"), &body)
            .await
            .unwrap();
        assert_eq!(parsed, Some(json!({"name": "alex"})));
    }

    #[tokio::test]
    async fn test_malformed_json_body() {
        let body = Bytes::from_static(b"{ nope");
        let err = parse_body(&headers("application/json"), &body).await.unwrap_err();
        assert!(matches!(err, ApiError::MalformedBody(_)));
    }

    #[tokio::test]
    async fn test_form_body() {
        let body = Bytes::from_static(b"name=alex&job_title=dev");
        let parsed = parse_body(&headers("application/x-www-form-urlencoded"), &body)
            .await
            .unwrap();
        assert_eq!(parsed, Some(json!({"name": "alex", "job_title": "dev"})));
    }

    #[tokio::test]
    async fn test_empty_and_opaque_bodies() {
        let empty = parse_body(&headers("application/json"), &Bytes::new()).await.unwrap();
        assert_eq!(empty, None);

        let text = parse_body(&HeaderMap::new(), &Bytes::from_static(b"hello")).await.unwrap();
        assert_eq!(text, Some(json!("hello")));
    }
}
