use std::io::{self, Write};

use coinscope_core::ScrapeError;
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::metadata::Metadata;

/// Standard response envelope for all `coinscope` outputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub meta: Metadata,
    pub data: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<EnvelopeError>,
}

/// Structured error payload for failed operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvelopeError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl From<&ScrapeError> for EnvelopeError {
    fn from(error: &ScrapeError) -> Self {
        Self {
            code: error.code().to_owned(),
            message: error.to_string(),
            location: error.location().map(str::to_owned),
        }
    }
}

pub fn render(envelope: &Envelope, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_to(&mut out, envelope, format, pretty)?;
    out.flush()?;
    Ok(())
}

pub fn render_to(
    out: &mut impl Write,
    envelope: &Envelope,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => render_table(out, envelope)?,
    }

    Ok(())
}

const COLUMNS: [&str; 6] = [
    "symbol",
    "name",
    "price",
    "market_cap",
    "volume",
    "circulating_supply",
];

fn render_table(out: &mut impl Write, envelope: &Envelope) -> Result<(), CliError> {
    writeln!(out, "request_id  : {}", envelope.meta.request_id)?;
    writeln!(out, "schema      : {}", envelope.meta.schema_version)?;
    writeln!(out, "generated_at: {}", envelope.meta.generated_at)?;
    writeln!(out, "source      : {}", envelope.meta.source)?;
    writeln!(out, "latency_ms  : {}", envelope.meta.latency_ms)?;

    let rows: &[Value] = match &envelope.data {
        Value::Array(rows) => rows.as_slice(),
        Value::Null => &[],
        single => std::slice::from_ref(single),
    };

    if !rows.is_empty() {
        let mut header = COLUMNS.to_vec();
        if rows.iter().any(|row| row.get("rank").is_some()) {
            header.insert(0, "rank");
        }

        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| header.iter().map(|column| cell(row, column)).collect())
            .collect();
        let widths: Vec<usize> = header
            .iter()
            .enumerate()
            .map(|(i, title)| {
                cells
                    .iter()
                    .map(|row| row[i].len())
                    .chain(std::iter::once(title.len()))
                    .max()
                    .unwrap_or_default()
            })
            .collect();

        writeln!(out)?;
        write_row(out, header.iter().map(|title| title.to_string()), &widths)?;
        for row in cells {
            write_row(out, row.into_iter(), &widths)?;
        }
    }

    if !envelope.errors.is_empty() {
        writeln!(out, "errors:")?;
        for error in &envelope.errors {
            writeln!(out, "  - {}: {}", error.code, error.message)?;
        }
    }

    Ok(())
}

fn cell(row: &Value, column: &str) -> String {
    match row.get(column) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn write_row(
    out: &mut impl Write,
    cells: impl Iterator<Item = String>,
    widths: &[usize],
) -> io::Result<()> {
    let line = cells
        .zip(widths.iter().copied())
        .map(|(text, width)| format!("{text:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())
}
