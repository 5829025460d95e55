//! CLI command implementations
//!
//! The rule table is loaded exactly once per command, before any request is
//! looked at.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::dispatch::{check_request, RequestDescriptor, ValidationOutcome};
use crate::http_server::extract::pairs_to_map;
use crate::http_server::{GuardServer, ServerConfig};
use crate::observability::{init_logging, level_for_verbosity, LogFormat};
use crate::rules::{Location, RuleTable};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments, set up logging, run the command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    init_logging(level_for_verbosity(cli.verbose), format);

    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            rules,
            host,
            port,
        } => serve(config.as_deref(), rules, host, port),
        Command::Check {
            rules,
            method,
            path,
            query,
            body,
        } => {
            let table = RuleTable::load(&rules)?;
            let outcome = check(&table, &method, &path, &query, body.as_deref())?;
            match outcome {
                ValidationOutcome::Accepted => {
                    let mut stdout = io::stdout();
                    writeln!(stdout, "accepted")?;
                    Ok(())
                }
                ValidationOutcome::Rejected(rejection) => {
                    Err(CliError::rejected(rejection.to_string()))
                }
            }
        }
        Command::Routes { rules } => {
            let table = RuleTable::load(&rules)?;
            let mut stdout = io::stdout();
            for line in describe_routes(&table) {
                writeln!(stdout, "{}", line)?;
            }
            Ok(())
        }
    }
}

/// Resolve the server configuration: file, then flags, then `PORT`.
pub fn resolve_config(
    config_path: Option<&Path>,
    rules: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> CliResult<ServerConfig> {
    let mut config = match config_path {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };

    if let Some(rules) = rules {
        config.rules_path = rules;
    }
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    Ok(config.apply_env()?)
}

/// Load the rules and run the HTTP gateway until it stops.
pub fn serve(
    config_path: Option<&Path>,
    rules: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> CliResult<()> {
    let config = resolve_config(config_path, rules, host, port)?;
    let table = RuleTable::load(&config.rules_path)?;

    let server = GuardServer::new(config, table);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::server_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::server_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Check one request described on the command line.
pub fn check(
    table: &RuleTable,
    method: &str,
    path: &str,
    query: &[String],
    body: Option<&str>,
) -> CliResult<ValidationOutcome> {
    let pairs = query
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| {
                    CliError::invalid_argument(format!(
                        "query parameter '{}' must look like NAME=VALUE",
                        pair
                    ))
                })
        })
        .collect::<CliResult<Vec<_>>>()?;

    let mut request = RequestDescriptor::new(method, "", path).with_query(pairs_to_map(pairs));

    if let Some(raw) = body {
        let body: Value = serde_json::from_str(raw)
            .map_err(|e| CliError::invalid_argument(format!("--body is not JSON: {}", e)))?;
        request = request.with_body(body);
    }

    Ok(check_request(&request, table))
}

/// One line per route: method, path, declared query names, body presence.
pub fn describe_routes(table: &RuleTable) -> Vec<String> {
    table
        .routes()
        .into_iter()
        .map(|(path, method, rule)| {
            let query: Vec<_> = rule
                .parameters
                .iter()
                .filter(|p| p.location == Location::Query)
                .map(|p| p.name.as_str())
                .collect();
            let query = if query.is_empty() {
                "-".to_string()
            } else {
                query.join(",")
            };
            let body = if rule.body_schema().is_some() { "yes" } else { "no" };

            format!(
                "{:<7} {}  query={}  body={}",
                method.to_ascii_uppercase(),
                path,
                query,
                body
            )
        })
        .collect()
}
