//! Main entry point for the srrdb CLI application.
//!
//! Parses the command line into a [`Config`] and runs the selected mode
//! against srrdb.com.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::io::Write;
use tracing_subscriber::EnvFilter;

use srrdb::{Action, Cli, Config, SrrdbClient, commands};

/// Application entry point.
///
/// Only fatal errors end up here; they are printed and the process exits
/// with a non-zero status.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let config = Config::from_cli(cli).context("Invalid configuration")?;
    tracing::debug!(?config, "starting");

    run(&config).await
}

/// Log to stderr so that stdout stays clean for file data.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Dispatch to the command handler of the configured action.
async fn run(config: &Config) -> Result<()> {
    let mut out = std::io::stdout();
    let client = || {
        SrrdbClient::new(config.base_url.clone(), config.timeout, config.max_retries)
            .context("Failed to create HTTP client")
    };

    match &config.action {
        Action::Version => commands::version(&mut out)?,
        Action::Help => Cli::command().print_help()?,
        Action::Search { query } => commands::search(&client()?, query, &mut out).await?,
        Action::Download { dirnames } => {
            commands::download(&client()?, config, dirnames, &mut out).await?
        }
        Action::UploadSrrs { paths } => commands::upload_srrs(&client()?, config, paths, &mut out)
            .await
            .context("Failed to upload SRR files")?,
        Action::UploadStoredFiles {
            paths,
            dirname,
            folder,
        } => {
            commands::upload_stored_files(&client()?, config, paths, dirname, folder, &mut out)
                .await?
        }
    }

    out.flush()?;
    Ok(())
}
