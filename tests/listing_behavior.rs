//! Behavior-driven tests for the top-currencies listing
//!
//! These tests verify WHAT a caller gets back from the listing page:
//! which rows are picked, in which order, and how figures are read.

mod support;

use coinscope_core::{ScrapeError, ScrapeErrorKind, StaticHttpClient};

use support::{source, LISTING_HTML, LISTING_URL};

// =============================================================================
// Listing: Row Selection
// =============================================================================

#[tokio::test]
async fn when_listing_has_starred_rows_caller_receives_exactly_those_in_page_order() {
    // Given: A listing page with three starred rows and two plain rows
    let client = StaticHttpClient::new()
        .with_html(LISTING_URL, LISTING_HTML)
        .into_shared();
    let cmc = source(client);

    // When: The caller asks for the top currencies
    let records = cmc
        .list_top_currencies()
        .await
        .expect("listing should parse");

    // Then: Only the starred rows come back, in document order
    let symbols: Vec<_> = records.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["BTC", "ETH", "USDT"]);
}

#[tokio::test]
async fn when_no_row_is_starred_caller_receives_empty_list() {
    // Given: A listing page where every star marker is gone
    let page = LISTING_HTML.replace(r#"<span class="icon-Star"></span>"#, "");
    let client = StaticHttpClient::new().with_html(LISTING_URL, page).into_shared();

    // When: The caller asks for the top currencies
    let records = source(client)
        .list_top_currencies()
        .await
        .expect("an unstarred page is not an error");

    // Then: Nothing is selected and no count is invented
    assert!(records.is_empty());
}

// =============================================================================
// Listing: Field Parsing
// =============================================================================

#[tokio::test]
async fn when_row_is_parsed_every_field_is_populated() {
    // Given: The listing fixture
    let client = StaticHttpClient::new()
        .with_html(LISTING_URL, LISTING_HTML)
        .into_shared();

    // When: It is extracted
    let records = source(client)
        .list_top_currencies()
        .await
        .expect("listing should parse");

    // Then: The first record carries every figure, parsed from page text
    let btc = &records[0];
    assert_eq!(btc.name, "Bitcoin");
    assert_eq!(
        btc.icon,
        "https://s2.coinmarketcap.com/static/img/coins/64x64/1.png"
    );
    assert_eq!(btc.figures.price, 43_250.12);
    assert_eq!(btc.figures.market_cap, 846_123_456_789.0);
    assert_eq!(btc.figures.volume, 21_512_345_678.0);
    assert_eq!(btc.figures.circulating_supply, 19_560_000.0);

    // And: Sub-dollar prices keep their precision
    assert_eq!(records[2].figures.price, 0.9998);
}

#[tokio::test]
async fn when_one_starred_row_is_malformed_the_whole_listing_fails() {
    // Given: A listing where the second starred row lost its volume marker
    let page = LISTING_HTML.replacen(
        r#"<p color="text">$9,876,543,210</p>"#,
        r#"<p>$9,876,543,210</p>"#,
        1,
    );
    let client = StaticHttpClient::new().with_html(LISTING_URL, page).into_shared();

    // When: The caller asks for the top currencies
    let err = source(client)
        .list_top_currencies()
        .await
        .expect_err("a broken row must fail the batch");

    // Then: No partial list is returned, and the error names the row
    assert_eq!(err.kind(), ScrapeErrorKind::DataCollection);
    match err {
        ScrapeError::DataCollection { url, source } => {
            assert_eq!(url, LISTING_URL);
            assert!(source.to_string().contains("volume"), "{source}");
            assert!(source.to_string().contains("row 1"), "{source}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// =============================================================================
// Listing: Fetch Contract
// =============================================================================

#[tokio::test]
async fn listing_is_fetched_once_per_call() {
    // Given: A counting transport
    let client = StaticHttpClient::new()
        .with_html(LISTING_URL, LISTING_HTML)
        .into_shared();
    let cmc = source(client.clone());

    // When: The listing is requested twice
    let first = cmc.list_top_currencies().await.expect("first call");
    let second = cmc.list_top_currencies().await.expect("second call");

    // Then: Each call made exactly one round trip and results are equal
    assert_eq!(client.hits(LISTING_URL), 2);
    assert_eq!(first, second);
}
