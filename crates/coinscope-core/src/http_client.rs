use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

/// HTTP request envelope used by the fetcher. Only GET is ever issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    /// Empty unless a caller adds entries; the fetcher sends none.
    pub headers: BTreeMap<String, String>,
    /// `None` leaves timing entirely to the transport.
    pub timeout_ms: Option<u64>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
            timeout_ms: None,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// HTTP response envelope returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Reason phrase, if the transport knows one.
    pub reason: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            reason: None,
            body: body.into(),
        }
    }

    pub fn ok_html(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Reason phrase reported by the transport, falling back to the
    /// canonical phrase for the status code.
    pub fn reason_phrase(&self) -> String {
        self.reason
            .clone()
            .or_else(|| {
                reqwest::StatusCode::from_u16(self.status)
                    .ok()
                    .and_then(|status| status.canonical_reason())
                    .map(str::to_owned)
            })
            .unwrap_or_default()
    }
}

/// Transport-level HTTP error: no response was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    message: String,
    timeout: bool,
    connect: bool,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timeout: false,
            connect: false,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            timeout: true,
            ..Self::new(message)
        }
    }

    pub fn connect(message: impl Into<String>) -> Self {
        Self {
            connect: true,
            ..Self::new(message)
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn is_timeout(&self) -> bool {
        self.timeout
    }

    pub const fn is_connect(&self) -> bool {
        self.connect
    }
}

impl Display for HttpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HttpError {}

/// Transport contract. Redirects, TLS and timeouts are the implementation's concern.
pub trait HttpClient: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>>;
}

/// Offline transport serving canned responses by URL.
///
/// Unknown URLs answer 404. Every request is recorded so tests can assert on
/// the number of round trips and on what was sent.
#[derive(Debug, Default)]
pub struct StaticHttpClient {
    responses: HashMap<String, Result<HttpResponse, HttpError>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StaticHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, url: impl Into<String>, response: HttpResponse) -> Self {
        self.responses.insert(url.into(), Ok(response));
        self
    }

    pub fn with_html(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_response(url, HttpResponse::ok_html(body))
    }

    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        self.with_response(url, HttpResponse::new(status, ""))
    }

    pub fn with_failure(mut self, url: impl Into<String>, error: HttpError) -> Self {
        self.responses.insert(url.into(), Err(error));
        self
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Number of requests issued to `url` so far.
    pub fn hits(&self, url: &str) -> usize {
        self.requests
            .lock()
            .map(|requests| requests.iter().filter(|request| request.url == url).count())
            .unwrap_or(0)
    }

    /// Every request received, in arrival order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl HttpClient for StaticHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(async move {
            let outcome = match self.responses.get(&request.url) {
                Some(outcome) => outcome.clone(),
                None => Ok(HttpResponse::new(404, "")),
            };

            if let Ok(mut requests) = self.requests.lock() {
                requests.push(request);
            }
            outcome
        })
    }
}

/// Production HTTP client using reqwest with its default headers,
/// redirect policy and TLS setup.
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpClient {
    client: Arc<reqwest::Client>,
}

impl HttpClient for ReqwestHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(async move {
            let mut builder = self.client.get(&request.url);

            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            if let Some(timeout_ms) = request.timeout_ms {
                builder = builder.timeout(std::time::Duration::from_millis(timeout_ms));
            }

            let response = builder.send().await.map_err(|e| {
                if e.is_timeout() {
                    HttpError::timeout(format!("request timeout: {}", e))
                } else if e.is_connect() {
                    HttpError::connect(format!("connection failed: {}", e))
                } else {
                    HttpError::new(format!("request failed: {}", e))
                }
            })?;

            let status = response.status();
            let reason = status.canonical_reason().map(str::to_owned);
            let body = response
                .text()
                .await
                .map_err(|e| HttpError::new(format!("failed to read response body: {}", e)))?;

            Ok(HttpResponse {
                status: status.as_u16(),
                reason,
                body,
            })
        })
    }
}
