mod currency;
mod top;

use std::time::Instant;

use coinscope_core::{CurrencySource, ScrapeError, ScrapeErrorKind};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::metadata::Metadata;
use crate::output::{Envelope, EnvelopeError};

pub struct CommandResult {
    pub data: Value,
    pub source: String,
    pub errors: Vec<EnvelopeError>,
    pub latency_ms: u64,
    pub exit_code: u8,
}

impl CommandResult {
    pub fn ok(data: Value, source: impl Into<String>) -> Self {
        Self {
            data,
            source: source.into(),
            errors: Vec::new(),
            latency_ms: 0,
            exit_code: 0,
        }
    }

    /// Failed scrape: the envelope still prints, with one structured error.
    pub fn failed(error: &ScrapeError, source: impl Into<String>) -> Self {
        Self {
            data: Value::Null,
            source: source.into(),
            errors: vec![EnvelopeError::from(error)],
            latency_ms: 0,
            exit_code: exit_code_for(error.kind()),
        }
    }

    pub fn with_latency_since(mut self, started: Instant) -> Self {
        self.latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        self
    }
}

pub const fn exit_code_for(kind: ScrapeErrorKind) -> u8 {
    match kind {
        ScrapeErrorKind::CurrencyNotExists | ScrapeErrorKind::PageNotFound => 3,
        ScrapeErrorKind::DataCollection => 4,
        ScrapeErrorKind::Transport | ScrapeErrorKind::UnexpectedStatus => 5,
    }
}

pub async fn run(cli: &Cli, source: &dyn CurrencySource) -> Result<(Envelope, u8), CliError> {
    let command_result = match &cli.command {
        Command::Top => top::run(source).await?,
        Command::Currency(args) => currency::run(args, source).await?,
    };

    let CommandResult {
        data,
        source,
        errors,
        latency_ms,
        exit_code,
    } = command_result;

    let envelope = Envelope {
        meta: Metadata::new(source, latency_ms)?,
        data,
        errors,
    };
    Ok((envelope, exit_code))
}
