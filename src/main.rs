use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "termwatch")]
#[command(about = "Terminal idle monitor - nags about stalled and runaway commands")]
#[command(version)]
struct Cli {
    /// Workspace directory whose .termwatch/config.toml overrides global settings
    #[arg(short, long, global = true)]
    workspace: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the monitor, speaking JSON lines with the host on stdin/stdout
    Serve,

    /// Write a default config.toml (workspace if --workspace is given, else global)
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show the effective settings and their sources
    Config,

    /// Check whether a terminal name is excluded from monitoring
    Match {
        /// Terminal name to test
        name: String,

        /// Comma-separated patterns to use instead of the configured ones
        #[arg(long)]
        patterns: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries host commands when serving
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let workspace = cli.workspace.as_deref();

    match cli.command {
        Some(Commands::Serve) | None => {
            cli::serve::serve_command(workspace).await?;
        }
        Some(Commands::Init { force }) => {
            cli::init::init_command(workspace, force).await?;
        }
        Some(Commands::Config) => {
            cli::config::config_command(workspace).await?;
        }
        Some(Commands::Match { name, patterns }) => {
            cli::matcher::match_command(workspace, &name, patterns).await?;
        }
    }

    Ok(())
}
