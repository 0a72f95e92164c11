use std::sync::Arc;

use crate::config::ScraperConfig;
use crate::data_source::{CurrencySource, SourceFuture};
use crate::error::{ExtractionError, LocatorError, ScrapeError};
use crate::extract::{DetailExtractor, ListingExtractor};
use crate::fetcher::{FetchError, Fetcher};
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::log::{LogSink, TracingLogSink};
use crate::{CurrencyName, DetailRecord, ListingRecord};

/// CoinMarketCap scraper: fetcher plus both extractors.
#[derive(Clone)]
pub struct CoinMarketCap {
    fetcher: Fetcher,
    listing: ListingExtractor,
    detail: DetailExtractor,
    listing_url: String,
    detail_base_url: String,
    log: Arc<dyn LogSink>,
}

impl CoinMarketCap {
    pub fn from_config(
        config: &ScraperConfig,
        client: Arc<dyn HttpClient>,
        log: Arc<dyn LogSink>,
    ) -> Result<Self, LocatorError> {
        Ok(Self {
            fetcher: Fetcher::new(client, log.clone()).with_timeout_ms(config.timeout_ms),
            listing: ListingExtractor::new(&config.listing)?,
            detail: DetailExtractor::new(&config.detail)?,
            listing_url: config.listing_url.clone(),
            detail_base_url: config.detail_base_url.trim_end_matches('/').to_owned(),
            log,
        })
    }

    /// Real network access through reqwest's default client, with `tracing`
    /// logging.
    pub fn live(config: &ScraperConfig) -> Result<Self, LocatorError> {
        let client = Arc::new(ReqwestHttpClient::default());
        Self::from_config(config, client, Arc::new(TracingLogSink))
    }

    pub async fn list_top_currencies(&self) -> Result<Vec<ListingRecord>, ScrapeError> {
        let url = self.listing_url.as_str();
        let document = self.fetcher.fetch(url).await?;

        self.listing
            .extract(&document)
            .map_err(|source| self.data_collection(url, source))
    }

    pub async fn get_currency(&self, name: &CurrencyName) -> Result<DetailRecord, ScrapeError> {
        let url = self.detail_url(name);
        let document = match self.fetcher.fetch(&url).await {
            Ok(document) => document,
            Err(FetchError::NotFound { .. }) => {
                self.log.currency_not_found(name.as_str());
                return Err(ScrapeError::CurrencyNotExists {
                    name: name.as_str().to_owned(),
                });
            }
            Err(other) => return Err(other.into()),
        };

        self.detail
            .extract(&document, name)
            .map_err(|source| self.data_collection(&url, source))
    }

    fn data_collection(&self, url: &str, source: ExtractionError) -> ScrapeError {
        let error = ScrapeError::DataCollection {
            url: url.to_owned(),
            source,
        };
        self.log.failure(&error.report());
        error
    }
}

impl CurrencySource for CoinMarketCap {
    fn listing_url(&self) -> &str {
        &self.listing_url
    }

    fn detail_url(&self, name: &CurrencyName) -> String {
        format!("{}/{}", self.detail_base_url, name.path_segment())
    }

    fn top_currencies(&self) -> SourceFuture<'_, Vec<ListingRecord>> {
        Box::pin(self.list_top_currencies())
    }

    fn currency<'a>(&'a self, name: &'a CurrencyName) -> SourceFuture<'a, DetailRecord> {
        Box::pin(self.get_currency(name))
    }
}
