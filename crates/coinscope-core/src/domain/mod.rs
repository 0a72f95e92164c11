//! # Domain Models
//!
//! Value types produced by the extraction pipeline.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ListingRecord`] | One favorited row of the listing page |
//! | [`DetailRecord`] | Detail page snapshot, adds the rank |
//! | [`MarketFigures`] | Price, market cap, volume and circulating supply |
//! | [`CurrencyName`] | Validated name used for detail lookups |
//!
//! Records are only built through their validating constructors, so a
//! record in hand is always fully populated with finite, non-negative
//! figures and non-empty identity fields.

mod models;
mod name;

pub use models::{DetailRecord, ListingRecord, MarketFigures};
pub use name::CurrencyName;
