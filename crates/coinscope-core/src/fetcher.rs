//! Single-shot page retrieval.
//!
//! [`Fetcher::fetch`] issues exactly one GET and classifies the outcome:
//!
//! | Outcome | Result |
//! |---------|--------|
//! | no response (DNS, refused, timeout, body read) | [`FetchError::Transport`] |
//! | 200 | parsed [`Document`] |
//! | 404 | [`FetchError::NotFound`] |
//! | anything else | [`FetchError::UnexpectedStatus`] |
//!
//! There are no retries and no headers beyond the transport's defaults. A
//! timeout is passed through only when the caller sets one. What a 404 means
//! is decided by the caller.

use std::sync::Arc;

use scraper::Html;
use thiserror::Error;

use crate::error::FailureReport;
use crate::http_client::{HttpClient, HttpError, HttpRequest};
use crate::log::LogSink;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("connection error fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: HttpError,
    },

    #[error("page not found {url}")]
    NotFound { url: String },

    #[error("status code (error): {status} {reason} from {url}")]
    UnexpectedStatus {
        url: String,
        status: u16,
        reason: String,
    },
}

impl FetchError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "fetch.transport",
            Self::NotFound { .. } => "fetch.not_found",
            Self::UnexpectedStatus { .. } => "fetch.unexpected_status",
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. }
            | Self::NotFound { url }
            | Self::UnexpectedStatus { url, .. } => url,
        }
    }
}

/// A fetched page, parsed leniently into a navigable tree.
#[derive(Debug)]
pub struct Document {
    url: String,
    html: Html,
}

impl Document {
    /// Malformed markup still yields a best-effort tree.
    pub fn parse(url: impl Into<String>, body: &str) -> Self {
        Self {
            url: url.into(),
            html: Html::parse_document(body),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn html(&self) -> &Html {
        &self.html
    }
}

#[derive(Clone)]
pub struct Fetcher {
    client: Arc<dyn HttpClient>,
    log: Arc<dyn LogSink>,
    timeout_ms: Option<u64>,
}

impl Fetcher {
    pub fn new(client: Arc<dyn HttpClient>, log: Arc<dyn LogSink>) -> Self {
        Self {
            client,
            log,
            timeout_ms: None,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub const fn timeout_ms(&self) -> Option<u64> {
        self.timeout_ms
    }

    pub async fn fetch(&self, url: &str) -> Result<Document, FetchError> {
        let request = HttpRequest::get(url).with_timeout_ms(self.timeout_ms);

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(source) => {
                return Err(self.report(FetchError::Transport {
                    url: url.to_owned(),
                    source,
                }))
            }
        };

        match response.status {
            200 => {
                self.log.page_fetched(url);
                Ok(Document::parse(url, &response.body))
            }
            404 => {
                self.log.page_not_found(url);
                Err(FetchError::NotFound {
                    url: url.to_owned(),
                })
            }
            status => Err(self.report(FetchError::UnexpectedStatus {
                url: url.to_owned(),
                status,
                reason: response.reason_phrase(),
            })),
        }
    }

    fn report(&self, error: FetchError) -> FetchError {
        self.log.failure(&FailureReport::from_error(
            error.code(),
            &error,
            Some(error.url()),
        ));
        error
    }
}

#[cfg(test)]
mod tests {
    use scraper::Selector;

    use super::*;
    use crate::http_client::{HttpResponse, StaticHttpClient};
    use crate::log::testing::RecordingLogSink;

    const URL: &str = "https://coinmarketcap.com/";

    fn fetcher(client: StaticHttpClient, log: Arc<RecordingLogSink>) -> Fetcher {
        Fetcher::new(Arc::new(client), log)
    }

    #[tokio::test]
    async fn ok_response_parses_document_and_logs_info() {
        let log = Arc::new(RecordingLogSink::default());
        let client = StaticHttpClient::new().with_html(URL, "<p class='x'>hello");

        let document = fetcher(client, log.clone())
            .fetch(URL)
            .await
            .expect("200 should parse");

        let selector = Selector::parse("p.x").expect("selector");
        let text: String = document
            .html()
            .select(&selector)
            .flat_map(|p| p.text())
            .collect();
        assert_eq!(text, "hello");
        assert_eq!(document.url(), URL);
        assert_eq!(log.lines(), vec![format!("info:{URL}")]);
    }

    #[tokio::test]
    async fn not_found_is_its_own_variant_and_logs_warning() {
        let log = Arc::new(RecordingLogSink::default());
        let client = StaticHttpClient::new().with_status(URL, 404);

        let err = fetcher(client, log.clone())
            .fetch(URL)
            .await
            .expect_err("404 must fail");

        assert!(matches!(err, FetchError::NotFound { .. }));
        assert_eq!(log.lines(), vec![format!("warn:{URL}")]);
    }

    #[tokio::test]
    async fn other_status_keeps_code_and_reason() {
        let log = Arc::new(RecordingLogSink::default());
        let client = StaticHttpClient::new().with_response(
            URL,
            HttpResponse::new(429, "slow down").with_reason("Too Many Requests"),
        );

        let err = fetcher(client, log.clone())
            .fetch(URL)
            .await
            .expect_err("429 must fail");

        match err {
            FetchError::UnexpectedStatus { status, reason, .. } => {
                assert_eq!(status, 429);
                assert_eq!(reason, "Too Many Requests");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(log.lines(), vec![String::from("error:fetch.unexpected_status")]);
    }

    #[tokio::test]
    async fn transport_failure_carries_cause() {
        let log = Arc::new(RecordingLogSink::default());
        let client =
            StaticHttpClient::new().with_failure(URL, HttpError::timeout("request timeout"));

        let err = fetcher(client, log.clone())
            .fetch(URL)
            .await
            .expect_err("transport must fail");

        match err {
            FetchError::Transport { source, .. } => assert!(source.is_timeout()),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(log.lines(), vec![String::from("error:fetch.transport")]);
    }

    #[tokio::test]
    async fn sends_one_request_with_configured_timeout() {
        let client = Arc::new(StaticHttpClient::new().with_status(URL, 500));
        let fetcher =
            Fetcher::new(client.clone(), Arc::new(crate::NoopLogSink)).with_timeout_ms(Some(50));

        let _ = fetcher.fetch(URL).await;

        assert_eq!(fetcher.timeout_ms(), Some(50));
        assert_eq!(client.hits(URL), 1);
        assert_eq!(client.requests()[0].timeout_ms, Some(50));
    }

    #[tokio::test]
    async fn sends_no_custom_headers_and_no_default_timeout() {
        let client = Arc::new(StaticHttpClient::new().with_html(URL, "<p>ok</p>"));
        let fetcher = Fetcher::new(client.clone(), Arc::new(crate::NoopLogSink));

        fetcher.fetch(URL).await.expect("200 should parse");

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        assert!(
            requests[0].headers.is_empty(),
            "headers sent: {:?}",
            requests[0].headers
        );
        assert_eq!(requests[0].timeout_ms, None);
    }
}
