//! Structural extraction from fetched pages.
//!
//! | Mode | Extractor | Output |
//! |------|-----------|--------|
//! | listing | [`ListingExtractor`] | every favorited row, document order |
//! | single item | [`DetailExtractor`] | one [`DetailRecord`](crate::DetailRecord) |
//!
//! Both are built from locator definitions and fail with
//! [`ExtractionError`](crate::ExtractionError) on the first missing element,
//! missing attribute or unparseable number.

mod detail;
mod listing;
pub mod numeric;

use scraper::ElementRef;

pub use detail::DetailExtractor;
pub use listing::ListingExtractor;

use crate::error::ExtractionError;

pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

pub(crate) fn read_number(
    field: &'static str,
    element: ElementRef<'_>,
    parse: fn(&str) -> Option<f64>,
) -> Result<f64, ExtractionError> {
    let raw = text_of(element);
    parse(&raw).ok_or(ExtractionError::InvalidNumber {
        field,
        raw,
        row: None,
    })
}
