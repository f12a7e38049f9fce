//! nbheader - automatic metadata headers for notebook documents
//!
//! Main entry point for the nbheader development harness.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use nbheader::cli::{Cli, Commands};
use nbheader::commands;
use nbheader::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(|| "config/config.yaml".to_string());
    let config = Config::load(&config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Preview { file } => {
            tracing::debug!(file, "Previewing synthesized header");
            commands::preview::run_preview(&config, &file)?;
            Ok(())
        }
        Commands::Simulate { scenario, output } => {
            tracing::info!(scenario = %scenario.display(), "Starting scenario replay");
            commands::simulate::run_simulate(config, &scenario, output.as_deref()).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "nbheader=debug" } else { "nbheader=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
