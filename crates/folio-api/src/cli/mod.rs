//! CLI command definitions for the `folio` binary.

pub mod context;
pub mod serve;
pub mod suggestions;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Portfolio chatbot: knowledge-base cache and prompt construction service.
#[derive(Parser)]
#[command(name = "folio", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to folio.toml (defaults to $FOLIO_CONFIG, then ./folio.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the knowledge cache and serve the HTTP API.
    Serve {
        /// Bind address (overrides server.host).
        #[arg(long)]
        host: Option<String>,

        /// Port (overrides server.port).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Load the knowledge base once and print the condensed prompt block.
    Context,

    /// Print the conversation starters for a language.
    Suggestions {
        /// Language code: fr, en or de. Anything else gets French.
        #[arg(short, long)]
        lang: Option<String>,
    },
}
