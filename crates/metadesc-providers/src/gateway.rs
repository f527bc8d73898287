//! HTTP gateway: the single choke point for outbound vendor calls.
//!
//! Every provider request goes through [`Gateway::request`]: one call, one
//! bounded timeout, a decoded JSON body or a structured [`ApiError`].
//! No retries, no caching, no state kept between calls.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde_json::Value;
use tracing::{debug, error, warn};

use metadesc_core::config::HttpConfig;
use metadesc_core::{ApiError, ApiResult};

// ─────────────────────────────────────────────
// Request
// ─────────────────────────────────────────────

/// A single outbound request.
#[derive(Clone, Debug)]
pub struct GatewayRequest {
    pub method: Method,
    /// Fully built URL, query string included.
    pub url: String,
    pub headers: HeaderMap,
    /// Serialized as JSON when present.
    pub body: Option<Value>,
    /// Overrides the gateway's default timeout for this call.
    pub timeout: Option<Duration>,
}

impl GatewayRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            headers: HeaderMap::new(),
            body: Some(body),
            timeout: None,
        }
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

// ─────────────────────────────────────────────
// Gateway trait
// ─────────────────────────────────────────────

/// Performs outbound requests on behalf of providers.
///
/// [`HttpGateway`] is the real implementation; tests swap in fakes.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Perform exactly one request and decode the JSON response.
    ///
    /// Non-2xx responses come back as `ApiError::Http` carrying the status
    /// and the raw body.
    async fn request(&self, request: GatewayRequest) -> ApiResult<Value>;
}

// ─────────────────────────────────────────────
// HttpGateway
// ─────────────────────────────────────────────

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// `reqwest`-backed gateway.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpGateway {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    /// A zero `timeoutSecs` falls back to [`DEFAULT_TIMEOUT`].
    pub fn from_config(config: &HttpConfig) -> Self {
        if config.timeout_secs == 0 {
            warn!(
                default_secs = DEFAULT_TIMEOUT.as_secs(),
                "Ignoring http.timeoutSecs = 0, using the default timeout"
            );
            return Self::new(DEFAULT_TIMEOUT);
        }
        Self::new(Duration::from_secs(config.timeout_secs))
    }

    /// Timeout applied when a request doesn't set its own.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for HttpGateway {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn request(&self, request: GatewayRequest) -> ApiResult<Value> {
        let timeout = request.timeout.unwrap_or(self.timeout);
        let log_url = redact_url(&request.url).to_string();

        debug!(
            method = %request.method,
            url = %log_url,
            timeout_ms = timeout.as_millis() as u64,
            has_body = request.body.is_some(),
            "Sending request"
        );

        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers)
            .timeout(timeout);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(resp) => resp,
            Err(e) => {
                let message = if e.is_timeout() {
                    format!("request timed out after {} ms", timeout.as_millis())
                } else {
                    format!("HTTP request failed: {}", without_url(&e))
                };
                error!(url = %log_url, error = %message, "Transport failure");
                return Err(ApiError::transport(message));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            warn!(url = %log_url, status = %status, "Non-success status");
            return Err(ApiError::status(
                status.as_u16(),
                format!("HTTP {}", status),
                body,
            ));
        }

        let text = response.text().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("request timed out after {} ms", timeout.as_millis())
            } else {
                format!("failed to read response body: {}", without_url(&e))
            };
            ApiError::transport(message)
        })?;

        serde_json::from_str(&text).map_err(|e| {
            warn!(url = %log_url, error = %e, "Response is not valid JSON");
            ApiError::parse(format!("invalid JSON in response: {}", e))
        })
    }
}

// ─────────────────────────────────────────────
// URL + header helpers
// ─────────────────────────────────────────────

/// A vendor endpoint: base URL, path, and query pairs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub base: String,
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Endpoint {
    pub fn new(base: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Build the full URL.
    pub fn url(&self) -> ApiResult<String> {
        endpoint_url(&self.base, &self.path, &self.query)
    }
}

/// Join `base` and `path` and append `query` pairs (percent-encoded).
///
/// Slashes at the seam are normalized, so `https://x/v1/` + `/models` and
/// `https://x/v1` + `models` both yield `https://x/v1/models`.
pub fn endpoint_url(base: &str, path: &str, query: &[(String, String)]) -> ApiResult<String> {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    let joined = if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    };

    let mut url = Url::parse(&joined)
        .map_err(|e| ApiError::transport(format!("invalid URL '{}': {}", joined, e)))?;
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query.iter());
    }
    Ok(url.to_string())
}

/// The header set every provider starts from:
/// `Content-Type: application/json` and `Authorization: Bearer <key>`.
pub fn default_headers(api_key: &str) -> ApiResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(AUTHORIZATION, sensitive_value(&format!("Bearer {}", api_key))?);
    Ok(headers)
}

/// Build a header value that is hidden from `Debug` output.
pub fn sensitive_value(value: &str) -> ApiResult<HeaderValue> {
    let mut value = HeaderValue::from_str(value).map_err(|_| {
        ApiError::transport("API key contains characters that are not valid in an HTTP header")
    })?;
    value.set_sensitive(true);
    Ok(value)
}

/// Strip the query string so keys passed in URLs never reach the logs.
pub fn redact_url(url: &str) -> &str {
    url.split_once('?').map_or(url, |(head, _)| head)
}

/// reqwest error text without the URL, which may carry an API key.
fn without_url(e: &reqwest::Error) -> String {
    let mut msg = e.to_string();
    if let Some(url) = e.url() {
        msg = msg.replace(url.as_str(), redact_url(url.as_str()));
    }
    msg
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
