//! Request descriptor handed to the dispatcher
//!
//! The HTTP layer parses the query string and body before building one of
//! these. The dispatcher only reads it.

use serde_json::{Map, Value};

/// Already-parsed view of an inbound request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestDescriptor {
    /// HTTP method, any case
    pub method: String,
    /// Mount prefix of the router that received the request
    pub base_path: String,
    /// Path below the mount prefix
    pub sub_path: String,
    /// Query parameters in the order they appeared
    pub query: Map<String, Value>,
    /// Parsed body, `None` when nothing was sent
    pub body: Option<Value>,
}

impl RequestDescriptor {
    /// Create a descriptor with no query and no body
    pub fn new(
        method: impl Into<String>,
        base_path: impl Into<String>,
        sub_path: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            base_path: base_path.into(),
            sub_path: sub_path.into(),
            ..Default::default()
        }
    }

    /// Append one query parameter
    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Replace the query mapping
    pub fn with_query(mut self, query: Map<String, Value>) -> Self {
        self.query = query;
        self
    }

    /// Set the body
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Route key: base path followed by sub path
    pub fn full_path(&self) -> String {
        format!("{}{}", self.base_path, self.sub_path)
    }

    /// Whether the request carries no body content
    pub fn body_is_empty(&self) -> bool {
        self.body.as_ref().map_or(true, is_empty_body)
    }
}

/// A body is empty when it is `null`, `{}`, `[]` or `""`.
pub fn is_empty_body(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(list) => list.is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_path_concatenates() {
        let req = RequestDescriptor::new("GET", "/api/account", "/search");
        assert_eq!(req.full_path(), "/api/account/search");

        let root = RequestDescriptor::new("GET", "", "/health");
        assert_eq!(root.full_path(), "/health");
    }

    #[test]
    fn test_query_keeps_insertion_order() {
        let req = RequestDescriptor::new("GET", "", "/x")
            .with_query_param("zeta", "1")
            .with_query_param("alpha", "2");
        let keys: Vec<_> = req.query.keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_empty_bodies() {
        assert!(RequestDescriptor::new("GET", "", "/x").body_is_empty());
        assert!(is_empty_body(&json!(null)));
        assert!(is_empty_body(&json!({})));
        assert!(is_empty_body(&json!([])));
        assert!(is_empty_body(&json!("")));
    }

    #[test]
    fn test_non_empty_bodies() {
        assert!(!is_empty_body(&json!({"name": "alex"})));
        assert!(!is_empty_body(&json!([1])));
        assert!(!is_empty_body(&json!("text")));
        assert!(!is_empty_body(&json!(0)));
        assert!(!is_empty_body(&json!(false)));
    }
}
