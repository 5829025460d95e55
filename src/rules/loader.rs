//! Rule table loading
//!
//! The rules document is read once at startup. A missing or malformed file
//! is a startup failure; there is no reload.

use std::fs;
use std::path::Path;

use super::errors::{RulesError, RulesResult};
use super::types::{RuleTable, RulesDocument};

impl RuleTable {
    /// Loads a rule table from a JSON rules file.
    pub fn load(path: &Path) -> RulesResult<Self> {
        let origin = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: origin.clone(),
            source,
        })?;

        let table = Self::parse(&content, &origin)?;

        tracing::info!(
            path = %origin,
            routes = table.route_count(),
            "rule table loaded"
        );

        Ok(table)
    }

    /// Parses a rule table from JSON text.
    pub fn from_json_str(content: &str) -> RulesResult<Self> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, origin: &str) -> RulesResult<Self> {
        let document: RulesDocument =
            serde_json::from_str(content).map_err(|source| RulesError::Parse {
                path: origin.to_string(),
                source,
            })?;

        Self::from_document(document)
    }
}
