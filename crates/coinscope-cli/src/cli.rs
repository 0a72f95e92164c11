//! CLI argument definitions for coinscope.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `top` | List the favorited currencies of the listing page |
//! | `currency` | Look up one currency by name |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--config` | none | JSON config file |
//! | `--timeout-ms` | config | Request timeout in ms (at least 1) |
//! | `--log-format` | `text` | Log format on stderr (text, json) |
//!
//! # Examples
//!
//! ```bash
//! coinscope top --format table
//! coinscope currency bitcoin --pretty
//! RUST_LOG=debug coinscope --log-format json currency eth
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Cryptocurrency market data scraped from CoinMarketCap.
#[derive(Debug, Parser)]
#[command(
    name = "coinscope",
    author,
    version,
    about = "Cryptocurrency market data scraped from CoinMarketCap"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// JSON config file with endpoints, timeout and locators.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Request timeout in milliseconds. Overrides config and environment.
    /// Unset leaves timing to the HTTP client.
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    /// Log format written to stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Summary table for terminal display.
    Table,
    /// Single JSON envelope.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    /// One JSON object per event.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the favorited top currencies of the listing page.
    Top,

    /// Look up a single currency by name.
    ///
    /// # Examples
    ///
    ///   coinscope currency bitcoin
    ///   coinscope currency ETH --format table
    Currency(CurrencyArgs),
}

#[derive(Debug, Args)]
pub struct CurrencyArgs {
    /// Currency name as used in the detail page location (e.g. bitcoin).
    pub name: String,
}
