//! # Coinscope Core
//!
//! Fetch-then-extract pipeline for CoinMarketCap listing and detail pages.
//!
//! ## Overview
//!
//! - **Fetcher** issues one GET and classifies the outcome into a parsed
//!   document, a 404, an unexpected status, or a transport failure
//! - **Extractors** walk the parsed document using locator definitions and
//!   produce fully populated records or fail
//! - **CoinMarketCap** composes the two and gives a detail-page 404 its
//!   meaning: the currency does not exist
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`coinmarketcap`] | The composed source and its public operations |
//! | [`config`] | Endpoint, timeout and locator configuration |
//! | [`data_source`] | `CurrencySource` trait |
//! | [`domain`] | Listing and detail records |
//! | [`error`] | Error taxonomy and failure reports |
//! | [`extract`] | Listing and detail extractors, number parsing |
//! | [`fetcher`] | Single-shot page retrieval |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`locator`] | Field locator definitions |
//! | [`log`] | Injected logging sink |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coinscope_core::{CoinMarketCap, CurrencyName, ScraperConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cmc = CoinMarketCap::live(&ScraperConfig::default())?;
//!
//!     for record in cmc.list_top_currencies().await? {
//!         println!("{} {:.2}", record.symbol, record.figures.price);
//!     }
//!
//!     let btc = cmc.get_currency(&CurrencyName::parse("bitcoin")?).await?;
//!     println!("#{} {}", btc.rank, btc.symbol);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use coinscope_core::{ScrapeError, ScrapeErrorKind};
//!
//! fn handle_error(error: ScrapeError) {
//!     match error.kind() {
//!         ScrapeErrorKind::CurrencyNotExists => {
//!             // Tell the user the name is unknown
//!         }
//!         ScrapeErrorKind::DataCollection => {
//!             // Page shape changed; locators need updating
//!         }
//!         _ => {}
//!     }
//! }
//! ```

pub mod coinmarketcap;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod http_client;
pub mod locator;
pub mod log;

pub use coinmarketcap::CoinMarketCap;

pub use config::{ConfigError, ScraperConfig};

pub use data_source::{CurrencySource, SourceFuture};

pub use domain::{CurrencyName, DetailRecord, ListingRecord, MarketFigures};

pub use error::{
    ExtractionError, FailureReport, LocatorError, ScrapeError, ScrapeErrorKind, ValidationError,
};

pub use extract::{DetailExtractor, ListingExtractor};

pub use fetcher::{Document, FetchError, Fetcher};

pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient, StaticHttpClient,
};

pub use locator::{AttrLocator, CellLocator, DetailLocators, ListingLocators};

pub use log::{LogSink, NoopLogSink, TracingLogSink};
