mod cli;
mod commands;
mod error;
mod logging;
mod metadata;
mod output;

use clap::Parser;
use std::process::ExitCode;

use coinscope_core::{CoinMarketCap, ScraperConfig};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_format);

    match run(&cli).await {
        Ok(code) => code,
        Err(error) => {
            tracing::error!(target: "coinscope", error = %error, "command failed");
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let config = load_config(cli)?;
    let source = CoinMarketCap::live(&config)?;

    let (envelope, exit_code) = commands::run(cli, &source).await?;
    output::render(&envelope, cli.format, cli.pretty)?;

    Ok(ExitCode::from(exit_code))
}

/// Defaults, then the config file, then environment, then flags.
fn load_config(cli: &Cli) -> Result<ScraperConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => ScraperConfig::from_json_file(path)?,
        None => ScraperConfig::default(),
    }
    .with_env_overrides()?;

    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }
    config.validate()?;
    Ok(config)
}
