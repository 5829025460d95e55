//! CLI argument definitions using clap
//!
//! Commands:
//! - routeguard serve [--config <path>] [--rules <path>] [--host <h>] [--port <p>]
//! - routeguard check --rules <path> --method <m> --path <p> [--query k=v]... [--body <json>]
//! - routeguard routes --rules <path>

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// routeguard - Declarative request validation for HTTP routes
#[derive(Parser, Debug)]
#[command(name = "routeguard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the validation gateway
    Serve {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Rules document (overrides the config file)
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides the config file; PORT overrides this)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Check a single request offline and exit
    Check {
        /// Rules document
        #[arg(long, default_value = "./rules.json")]
        rules: PathBuf,

        /// HTTP method
        #[arg(long, default_value = "GET")]
        method: String,

        /// Full request path, e.g. /api/account/search
        #[arg(long)]
        path: String,

        /// Query parameter; repeat for several, repeat a name for an array
        #[arg(long = "query", value_name = "NAME=VALUE")]
        query: Vec<String>,

        /// JSON request body
        #[arg(long)]
        body: Option<String>,
    },

    /// List the routes a rules document declares
    Routes {
        /// Rules document
        #[arg(long, default_value = "./rules.json")]
        rules: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
