//! Contract tests for `CurrencySource` implementations.
//!
//! Every source must satisfy these through the trait object alone.

#[path = "../support/mod.rs"]
mod support;

use std::sync::Arc;

use coinscope_core::{CurrencySource, ScrapeErrorKind, StaticHttpClient};

use support::{detail_url, name, source, DETAIL_HTML, LISTING_HTML, LISTING_URL};

fn fixture_source() -> Arc<dyn CurrencySource> {
    let client = StaticHttpClient::new()
        .with_html(LISTING_URL, LISTING_HTML)
        .with_html(detail_url("BTC"), DETAIL_HTML)
        .into_shared();
    Arc::new(source(client))
}

#[test]
fn source_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<coinscope_core::CoinMarketCap>();
}

#[test]
fn source_exposes_resolved_locations() {
    let source = fixture_source();
    assert_eq!(source.listing_url(), LISTING_URL);
    assert_eq!(source.detail_url(&name("eth")), detail_url("ETH"));
}

#[tokio::test]
async fn top_currencies_through_trait_object() {
    let source = fixture_source();
    let records = source.top_currencies().await.expect("listing parses");
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.figures.price >= 0.0));
}

#[tokio::test]
async fn currency_through_trait_object() {
    let source = fixture_source();
    let record = source.currency(&name("BTC")).await.expect("detail parses");
    assert_eq!(record.rank, 1);

    let missing = source
        .currency(&name("FAKEXYZ"))
        .await
        .expect_err("unknown currency");
    assert_eq!(missing.kind(), ScrapeErrorKind::CurrencyNotExists);
}

#[tokio::test]
async fn lookups_can_run_concurrently() {
    let source = fixture_source();
    let btc = name("BTC");

    let (listing, detail) = tokio::join!(source.top_currencies(), source.currency(&btc));

    assert_eq!(listing.expect("listing").len(), 3);
    assert_eq!(detail.expect("detail").symbol, "BTC");
}
