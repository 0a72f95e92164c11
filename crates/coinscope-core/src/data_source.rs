//! Source contract for the two public operations.
//!
//! | Operation | Output | Failure kinds |
//! |-----------|--------|---------------|
//! | [`top_currencies`](CurrencySource::top_currencies) | `Vec<ListingRecord>` | transport, unexpected status, page not found, data collection |
//! | [`currency`](CurrencySource::currency) | [`DetailRecord`] | transport, unexpected status, currency not exists, data collection |
//!
//! Each call performs one fetch and one parse pass. Nothing is cached or
//! retried.

use std::future::Future;
use std::pin::Pin;

use crate::{CurrencyName, DetailRecord, ListingRecord, ScrapeError};

/// Future type returned by [`CurrencySource`] methods.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ScrapeError>> + Send + 'a>>;

/// Implementations must be `Send + Sync`; calls share no mutable state and
/// may run concurrently.
pub trait CurrencySource: Send + Sync {
    /// Location of the listing page.
    fn listing_url(&self) -> &str;

    /// Location of the detail page for `name`.
    fn detail_url(&self, name: &CurrencyName) -> String;

    /// Every favorited row of the listing page, in page order.
    fn top_currencies(&self) -> SourceFuture<'_, Vec<ListingRecord>>;

    /// Detail lookup. A 404 means the currency does not exist.
    fn currency<'a>(&'a self, name: &'a CurrencyName) -> SourceFuture<'a, DetailRecord>;
}
