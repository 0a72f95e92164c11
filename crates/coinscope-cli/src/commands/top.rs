use std::time::Instant;

use coinscope_core::CurrencySource;

use crate::error::CliError;

use super::CommandResult;

pub async fn run(source: &dyn CurrencySource) -> Result<CommandResult, CliError> {
    let started = Instant::now();

    let result = match source.top_currencies().await {
        Ok(records) => CommandResult::ok(serde_json::to_value(records)?, source.listing_url()),
        Err(error) => CommandResult::failed(&error, source.listing_url()),
    };
    Ok(result.with_latency_since(started))
}
