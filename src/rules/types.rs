//! Rule table definitions
//!
//! A rule table maps a route path and a lowercased HTTP method to the
//! parameter rules declared for that operation. The table is built once and
//! only read afterwards.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::schema::SchemaFragment;

use super::errors::{RulesError, RulesResult};

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// Query string parameter
    Query,
    /// Request body
    Body,
    /// Path, header, cookie or form locations. Declared but not enforced.
    #[serde(other)]
    Other,
}

/// One declared parameter of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterRule {
    /// Parameter name. Unused for body rules.
    pub name: String,
    /// Where the parameter lives
    pub location: Location,
    /// Expected shape. `None` when the rule declares no type; such a query
    /// parameter rejects every value.
    pub schema: Option<SchemaFragment>,
}

impl ParameterRule {
    /// Create a query parameter rule
    pub fn query(name: impl Into<String>, schema: SchemaFragment) -> Self {
        Self {
            name: name.into(),
            location: Location::Query,
            schema: Some(schema),
        }
    }

    /// Create a body rule
    pub fn body(schema: SchemaFragment) -> Self {
        Self {
            name: String::new(),
            location: Location::Body,
            schema: Some(schema),
        }
    }

    /// Decode a parameter object from a rules document.
    ///
    /// The schema is read from the `schema` key when present. Otherwise the
    /// type keys of the parameter object itself are used, the OpenAPI 2
    /// inline style (`{"name": "page", "in": "query", "type": "integer"}`).
    pub fn from_value(value: Value) -> RulesResult<Self> {
        let raw: RawParameter =
            serde_json::from_value(value).map_err(|e| RulesError::InvalidRoute {
                path: String::new(),
                method: String::new(),
                reason: e.to_string(),
            })?;

        let schema_value = match raw.schema {
            Some(schema) => schema,
            None => inline_schema(&raw.inline),
        };

        let schema = if is_empty_schema(&schema_value) {
            None
        } else {
            let fragment = SchemaFragment::from_value(schema_value).map_err(|source| {
                RulesError::InvalidSchema {
                    name: raw.name.clone(),
                    source,
                }
            })?;
            Some(fragment)
        };

        Ok(Self {
            name: raw.name,
            location: raw.location,
            schema,
        })
    }
}

#[derive(Deserialize)]
struct RawParameter {
    #[serde(default)]
    name: String,
    #[serde(rename = "in")]
    location: Location,
    #[serde(default)]
    schema: Option<Value>,
    #[serde(flatten)]
    inline: Map<String, Value>,
}

/// Picks the type keys out of an inline parameter object.
///
/// A boolean `required` is the OpenAPI parameter flag, not an object
/// schema's required list, so it is left out.
fn inline_schema(params: &Map<String, Value>) -> Value {
    let mut schema = Map::new();
    for key in ["type", "items", "properties"] {
        if let Some(v) = params.get(key) {
            schema.insert(key.to_string(), v.clone());
        }
    }
    if let Some(required @ Value::Array(_)) = params.get("required") {
        schema.insert("required".to_string(), required.clone());
    }
    Value::Object(schema)
}

fn is_empty_schema(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Constraints declared for one (path, method) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteRule {
    /// Parameter rules in declaration order
    pub parameters: Vec<ParameterRule>,
}

impl RouteRule {
    /// Create a route rule from its parameters
    pub fn new(parameters: Vec<ParameterRule>) -> Self {
        Self { parameters }
    }

    /// Query parameter rules in declaration order
    pub fn query_rules(&self) -> impl Iterator<Item = &ParameterRule> {
        self.parameters
            .iter()
            .filter(|p| p.location == Location::Query)
    }

    /// Finds the query rule declared under `name`
    pub fn query_rule(&self, name: &str) -> Option<&ParameterRule> {
        self.query_rules().find(|p| p.name == name)
    }

    /// Schema of the body rule. Only the first body rule counts.
    pub fn body_schema(&self) -> Option<&SchemaFragment> {
        self.parameters
            .iter()
            .find(|p| p.location == Location::Body)
            .and_then(|p| p.schema.as_ref())
    }
}

/// HTTP methods recognized as operation keys of a path item.
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Process-wide table of route rules, keyed by path then lowercased method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    routes: HashMap<String, HashMap<String, RouteRule>>,
}

impl RuleTable {
    /// Create an empty table. Every request passes through it unchecked.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route while building a table.
    pub fn with_route(
        mut self,
        path: impl Into<String>,
        method: &str,
        rule: RouteRule,
    ) -> Self {
        self.routes
            .entry(path.into())
            .or_default()
            .insert(method.to_ascii_lowercase(), rule);
        self
    }

    /// Build a table from a decoded rules document.
    ///
    /// Path item keys that are not HTTP methods are ignored, as are all
    /// operation keys other than `parameters`.
    pub fn from_document(document: RulesDocument) -> RulesResult<Self> {
        let mut table = Self::new();

        for (path, item) in document.paths {
            for (key, operation) in item {
                let method = key.to_ascii_lowercase();
                if !HTTP_METHODS.contains(&method.as_str()) {
                    continue;
                }
                let rule = decode_operation(&path, &method, operation)?;
                table = table.with_route(path.clone(), &method, rule);
            }
        }

        Ok(table)
    }

    /// Looks up the rule for a path and method. The method is matched
    /// case-insensitively.
    pub fn get(&self, path: &str, method: &str) -> Option<&RouteRule> {
        self.routes
            .get(path)?
            .get(method.to_ascii_lowercase().as_str())
    }

    /// Number of (path, method) pairs with rules
    pub fn route_count(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    /// Whether the table declares no routes
    pub fn is_empty(&self) -> bool {
        self.route_count() == 0
    }

    /// All routes as `(path, method, rule)`, sorted by path then method.
    pub fn routes(&self) -> Vec<(&str, &str, &RouteRule)> {
        let mut routes: Vec<_> = self
            .routes
            .iter()
            .flat_map(|(path, methods)| {
                methods
                    .iter()
                    .map(move |(method, rule)| (path.as_str(), method.as_str(), rule))
            })
            .collect();
        routes.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        routes
    }
}

fn decode_operation(path: &str, method: &str, operation: Value) -> RulesResult<RouteRule> {
    let invalid = |reason: String| RulesError::InvalidRoute {
        path: path.to_string(),
        method: method.to_string(),
        reason,
    };

    let parameters = match operation {
        Value::Object(mut op) => op.remove("parameters").unwrap_or(Value::Null),
        other => {
            return Err(invalid(format!(
                "operation must be an object, found {}",
                crate::schema::json_type_name(&other)
            )))
        }
    };

    let parameters = match parameters {
        Value::Null => Vec::new(),
        Value::Array(list) => list,
        _ => return Err(invalid("`parameters` must be a list".to_string())),
    };

    let rules = parameters
        .into_iter()
        .map(|p| {
            ParameterRule::from_value(p).map_err(|e| match e {
                RulesError::InvalidRoute { reason, .. } => invalid(reason),
                other => other,
            })
        })
        .collect::<RulesResult<Vec<_>>>()?;

    Ok(RouteRule::new(rules))
}

/// Top-level shape of a rules document: `{"paths": {path: {method: op}}}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulesDocument {
    /// Path items keyed by route path
    #[serde(default)]
    pub paths: HashMap<String, Map<String, Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: Value) -> RulesDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_inline_query_parameter() {
        let rule = ParameterRule::from_value(json!({
            "name": "page",
            "in": "query",
            "required": false,
            "type": "integer"
        }))
        .unwrap();

        assert_eq!(rule, ParameterRule::query("page", SchemaFragment::integer()));
    }

    #[test]
    fn test_schema_key_parameter() {
        let rule = ParameterRule::from_value(json!({
            "name": "ids",
            "in": "query",
            "schema": {"type": "array", "items": {"type": "integer"}}
        }))
        .unwrap();

        assert_eq!(
            rule.schema,
            Some(SchemaFragment::array(SchemaFragment::integer()))
        );
    }

    #[test]
    fn test_empty_body_schema_is_none() {
        let rule = ParameterRule::from_value(json!({"in": "body", "schema": {}})).unwrap();
        assert_eq!(rule.location, Location::Body);
        assert!(rule.schema.is_none());
    }

    #[test]
    fn test_other_locations_kept() {
        let rule = ParameterRule::from_value(json!({
            "name": "X-Request-Id",
            "in": "header",
            "type": "string"
        }))
        .unwrap();
        assert_eq!(rule.location, Location::Other);
    }

    #[test]
    fn test_bad_parameter_schema_names_parameter() {
        let err = ParameterRule::from_value(json!({
            "name": "ids",
            "in": "query",
            "type": "array",
            "items": "integer"
        }))
        .unwrap_err();
        assert!(matches!(err, RulesError::InvalidSchema { ref name, .. } if name == "ids"));
    }

    #[test]
    fn test_route_rule_partitions() {
        let rule = RouteRule::new(vec![
            ParameterRule::query("page", SchemaFragment::integer()),
            ParameterRule::body(SchemaFragment::string()),
            ParameterRule::query("sort", SchemaFragment::string()),
        ]);

        let names: Vec<_> = rule.query_rules().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["page", "sort"]);
        assert!(rule.query_rule("sort").is_some());
        assert!(rule.query_rule("missing").is_none());
        assert_eq!(rule.body_schema(), Some(&SchemaFragment::string()));
    }

    #[test]
    fn test_table_from_document() {
        let table = RuleTable::from_document(document(json!({
            "paths": {
                "/api/account/search": {
                    "summary": "ignored",
                    "parameters": [],
                    "GET": {
                        "parameters": [
                            {"name": "page", "in": "query", "type": "integer"}
                        ]
                    }
                },
                "/api/account/role": {
                    "get": {"responses": {}}
                }
            }
        })))
        .unwrap();

        assert_eq!(table.route_count(), 2);
        let search = table.get("/api/account/search", "GET").unwrap();
        assert!(search.query_rule("page").is_some());
        assert!(table.get("/api/account/search", "post").is_none());
        assert!(table.get("/api/account/role", "get").unwrap().parameters.is_empty());
    }

    #[test]
    fn test_table_rejects_non_list_parameters() {
        let err = RuleTable::from_document(document(json!({
            "paths": {"/x": {"get": {"parameters": {"name": "page"}}}}
        })))
        .unwrap_err();
        assert!(err.to_string().contains("get /x"));
    }

    #[test]
    fn test_parameter_decode_error_carries_route() {
        let err = RuleTable::from_document(document(json!({
            "paths": {"/x": {"put": {"parameters": [{"name": "page"}]}}}
        })))
        .unwrap_err();
        assert!(matches!(err, RulesError::InvalidRoute { ref path, ref method, .. }
            if path == "/x" && method == "put"));
    }

    #[test]
    fn test_routes_sorted() {
        let table = RuleTable::new()
            .with_route("/b", "GET", RouteRule::default())
            .with_route("/a", "put", RouteRule::default())
            .with_route("/a", "get", RouteRule::default());

        let keys: Vec<_> = table.routes().iter().map(|(p, m, _)| (*p, *m)).collect();
        assert_eq!(keys, vec![("/a", "get"), ("/a", "put"), ("/b", "get")]);
        assert!(!table.is_empty());
        assert!(RuleTable::new().is_empty());
    }
}
