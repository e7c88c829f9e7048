//! folio CLI and REST API entry point.
//!
//! Binary name: `folio`
//!
//! Parses CLI arguments, sets up tracing, loads config and secrets, then
//! dispatches to the command handler.

mod cli;
mod http;
mod state;

use clap::Parser;

use folio_infra::config::{Secrets, config_path, load_config, load_dotenv};
use folio_observe::tracing_setup::{
    LogFormat, TracingOptions, directive_for_verbosity, init_tracing, shutdown_tracing,
};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&TracingOptions {
        format: if cli.json_logs {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        },
        default_directive: directive_for_verbosity(cli.verbose).to_string(),
        enable_otel: cli.otel,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(args: Cli) -> anyhow::Result<()> {
    // `.env` may name the config file, so it loads first.
    load_dotenv();
    let config = load_config(&config_path(args.config)).await;
    let secrets = Secrets::from_env();

    match args.command {
        Commands::Serve { host, port } => cli::serve::serve(&config, &secrets, host, port).await,
        Commands::Context => cli::context::print_context(&config, &secrets, args.json).await,
        Commands::Suggestions { lang } => {
            cli::suggestions::print_suggestions(lang.as_deref(), args.json)
        }
    }
}
