use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, error};

use rackform::adapter::inbound::cli::command::Cli;
use rackform::adapter::inbound::cli::output;
use rackform::adapter::inbound::cli::run::dispatch;
use rackform::infrastructure::bootstrap::services_from_config;
use rackform::infrastructure::config::settings::Config;

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::load(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;

    config.init_logging();
    debug!(config = %cli.config.display(), rack = %config.rack, "rackform starting");

    let services = services_from_config(&config);
    dispatch(cli, &services).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(output::OutputMode::from_flags(cli.json, cli.quiet));

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            output::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
