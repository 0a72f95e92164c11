use std::fmt::{Display, Formatter};

use serde::Serialize;
use thiserror::Error;

use crate::fetcher::FetchError;
use crate::http_client::HttpError;

/// Validation errors for records and lookup inputs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field '{field}' cannot be empty")]
    EmptyField { field: &'static str },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("rank must be a positive integer")]
    InvalidRank,

    #[error("currency name cannot be empty")]
    EmptyCurrencyName,
    #[error("currency name length {len} exceeds max {max}")]
    CurrencyNameTooLong { len: usize, max: usize },
    #[error("currency name contains reserved character '{ch}'")]
    CurrencyNameInvalidChar { ch: char },
}

/// Raised while compiling locator definitions into CSS selectors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocatorError {
    #[error("locator '{field}' has invalid selector '{selector}': {reason}")]
    InvalidSelector {
        field: &'static str,
        selector: String,
        reason: String,
    },
}

/// Structural failure while walking a fetched document.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExtractionError {
    #[error("missing element for '{field}' (selector '{selector}'){}", row_suffix(.row))]
    MissingElement {
        field: &'static str,
        selector: String,
        row: Option<usize>,
    },

    #[error("missing column {column} for '{field}'{}", row_suffix(.row))]
    MissingColumn {
        field: &'static str,
        column: usize,
        row: Option<usize>,
    },

    #[error("missing attribute '{attribute}' for '{field}'{}", row_suffix(.row))]
    MissingAttribute {
        field: &'static str,
        attribute: String,
        row: Option<usize>,
    },

    #[error("field '{field}' is not a number: '{raw}'{}", row_suffix(.row))]
    InvalidNumber {
        field: &'static str,
        raw: String,
        row: Option<usize>,
    },

    #[error("rank text '{raw}' is not of the form '{prefix}<N>'")]
    InvalidRank { raw: String, prefix: String },

    #[error("record rejected{}: {source}", row_suffix(.row))]
    Invalid {
        #[source]
        source: ValidationError,
        row: Option<usize>,
    },
}

impl ExtractionError {
    /// Tags a row-less error with the position of the listing row it came from.
    pub(crate) fn in_row(self, index: usize) -> Self {
        let at = Some(index);
        match self {
            Self::MissingElement { field, selector, .. } => Self::MissingElement {
                field,
                selector,
                row: at,
            },
            Self::MissingColumn { field, column, .. } => Self::MissingColumn {
                field,
                column,
                row: at,
            },
            Self::MissingAttribute {
                field, attribute, ..
            } => Self::MissingAttribute {
                field,
                attribute,
                row: at,
            },
            Self::InvalidNumber { field, raw, .. } => Self::InvalidNumber { field, raw, row: at },
            Self::Invalid { source, .. } => Self::Invalid { source, row: at },
            other => other,
        }
    }
}

impl From<ValidationError> for ExtractionError {
    fn from(source: ValidationError) -> Self {
        Self::Invalid { source, row: None }
    }
}

fn row_suffix(row: &Option<usize>) -> String {
    row.map(|index| format!(" in favorited row {index}"))
        .unwrap_or_default()
}

/// Caller-facing error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrapeErrorKind {
    Transport,
    UnexpectedStatus,
    PageNotFound,
    CurrencyNotExists,
    DataCollection,
}

/// Error returned by the two public operations.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("transport error fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: HttpError,
    },

    #[error("unexpected status {status} {reason} from {url}")]
    UnexpectedStatus {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("page not found: {url}")]
    PageNotFound { url: String },

    #[error("crypto currency {name} not exists")]
    CurrencyNotExists { name: String },

    #[error("data collection failed for {url}: {source}")]
    DataCollection {
        url: String,
        #[source]
        source: ExtractionError,
    },
}

impl ScrapeError {
    pub const fn kind(&self) -> ScrapeErrorKind {
        match self {
            Self::Transport { .. } => ScrapeErrorKind::Transport,
            Self::UnexpectedStatus { .. } => ScrapeErrorKind::UnexpectedStatus,
            Self::PageNotFound { .. } => ScrapeErrorKind::PageNotFound,
            Self::CurrencyNotExists { .. } => ScrapeErrorKind::CurrencyNotExists,
            Self::DataCollection { .. } => ScrapeErrorKind::DataCollection,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self.kind() {
            ScrapeErrorKind::Transport => "scrape.transport",
            ScrapeErrorKind::UnexpectedStatus => "scrape.unexpected_status",
            ScrapeErrorKind::PageNotFound => "scrape.page_not_found",
            ScrapeErrorKind::CurrencyNotExists => "scrape.currency_not_exists",
            ScrapeErrorKind::DataCollection => "scrape.data_collection",
        }
    }

    /// Location of the page involved, when the failure is tied to one.
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Transport { url, .. }
            | Self::UnexpectedStatus { url, .. }
            | Self::PageNotFound { url }
            | Self::DataCollection { url, .. } => Some(url),
            Self::CurrencyNotExists { .. } => None,
        }
    }

    pub fn report(&self) -> FailureReport {
        FailureReport::from_error(self.code(), self, self.location())
    }
}

/// 404 has already been given its meaning by the caller at this point; a
/// plain conversion can only claim the page itself is missing.
impl From<FetchError> for ScrapeError {
    fn from(error: FetchError) -> Self {
        match error {
            FetchError::Transport { url, source } => Self::Transport { url, source },
            FetchError::NotFound { url } => Self::PageNotFound { url },
            FetchError::UnexpectedStatus {
                url,
                status,
                reason,
            } => Self::UnexpectedStatus {
                url,
                status,
                reason,
            },
        }
    }
}

/// Serializable form of a failure, handed to log sinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureReport {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cause_chain: Vec<String>,
}

impl FailureReport {
    pub fn from_error(
        code: &'static str,
        error: &(dyn std::error::Error + 'static),
        location: Option<&str>,
    ) -> Self {
        let mut cause_chain = Vec::new();
        let mut current = error.source();
        while let Some(cause) = current {
            cause_chain.push(cause.to_string());
            current = cause.source();
        }

        Self {
            code,
            message: error.to_string(),
            location: location.map(str::to_owned),
            cause_chain,
        }
    }
}

impl Display for FailureReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_not_found_maps_to_page_not_found() {
        let error = ScrapeError::from(FetchError::NotFound {
            url: String::from("https://coinmarketcap.com/"),
        });

        assert_eq!(error.kind(), ScrapeErrorKind::PageNotFound);
        assert_eq!(error.code(), "scrape.page_not_found");
        assert_eq!(error.location(), Some("https://coinmarketcap.com/"));
    }

    #[test]
    fn unexpected_status_keeps_status_and_reason() {
        let error = ScrapeError::from(FetchError::UnexpectedStatus {
            url: String::from("https://coinmarketcap.com/"),
            status: 503,
            reason: String::from("Service Unavailable"),
        });

        match error {
            ScrapeError::UnexpectedStatus { status, reason, .. } => {
                assert_eq!(status, 503);
                assert_eq!(reason, "Service Unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn report_collects_cause_chain() {
        let error = ScrapeError::DataCollection {
            url: String::from("https://coinmarketcap.com/currencies/BTC"),
            source: ExtractionError::MissingElement {
                field: "price",
                selector: String::from(".priceValue"),
                row: None,
            },
        };

        let report = error.report();
        assert_eq!(report.code, "scrape.data_collection");
        assert_eq!(
            report.location.as_deref(),
            Some("https://coinmarketcap.com/currencies/BTC")
        );
        assert_eq!(report.cause_chain.len(), 1);
        assert!(report.cause_chain[0].contains(".priceValue"));

        let json = serde_json::to_value(&report).expect("report serializes");
        assert_eq!(json["code"], "scrape.data_collection");
    }

    #[test]
    fn row_position_is_reported() {
        let error = ExtractionError::InvalidNumber {
            field: "price",
            raw: String::from("n/a"),
            row: None,
        }
        .in_row(4);

        assert_eq!(
            error.to_string(),
            "field 'price' is not a number: 'n/a' in favorited row 4"
        );
    }
}
