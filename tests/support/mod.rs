//! Shared fixtures for behavior tests.
#![allow(dead_code)]

use std::sync::Arc;

use coinscope_core::{
    CoinMarketCap, CurrencyName, NoopLogSink, ScraperConfig, StaticHttpClient,
};

pub const LISTING_URL: &str = "https://coinmarketcap.com/";
pub const DETAIL_BASE_URL: &str = "https://coinmarketcap.com/currencies";

pub const LISTING_HTML: &str = include_str!("../fixtures/listing.html");
pub const DETAIL_HTML: &str = include_str!("../fixtures/detail.html");

pub fn detail_url(segment: &str) -> String {
    format!("{DETAIL_BASE_URL}/{segment}")
}

pub fn source(client: Arc<StaticHttpClient>) -> CoinMarketCap {
    CoinMarketCap::from_config(&ScraperConfig::default(), client, Arc::new(NoopLogSink))
        .expect("default config builds a source")
}

pub fn name(raw: &str) -> CurrencyName {
    CurrencyName::parse(raw).expect("valid currency name")
}
