use std::time::Instant;

use coinscope_core::{CurrencyName, CurrencySource};

use crate::cli::CurrencyArgs;
use crate::error::CliError;

use super::CommandResult;

pub async fn run(args: &CurrencyArgs, source: &dyn CurrencySource) -> Result<CommandResult, CliError> {
    let name = CurrencyName::parse(&args.name)?;
    let location = source.detail_url(&name);
    let started = Instant::now();

    let result = match source.currency(&name).await {
        Ok(record) => CommandResult::ok(serde_json::to_value(record)?, location),
        Err(error) => CommandResult::failed(&error, location),
    };
    Ok(result.with_latency_since(started))
}
