//! Single-attempt HTTP transport for the JSearch API
//!
//! Provides the request/response primitive used by the API client:
//! - URL construction with form-encoded query parameters
//! - JSON body serialization for POST
//! - Status checking with a truncated body as diagnostic
//! - JSON decoding of the response body
//!
//! No retries and no throttling happen here.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::{ApiError, ApiResult};
use crate::metrics::HttpRequestMetrics;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Maximum number of body characters kept in an HTTP error message
const ERROR_BODY_LIMIT: usize = 200;

/// HTTP transport bound to one base URL
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport with default headers and a fixed timeout
    ///
    /// # Arguments
    /// * `base_url` - Scheme and host (e.g., "<https://api.openwebninja.com>")
    /// * `headers` - Headers sent with every request
    /// * `timeout` - Whole-request timeout applied to every call
    pub fn new(
        base_url: impl Into<String>,
        headers: HeaderMap,
        timeout: Duration,
    ) -> ApiResult<Self> {
        // No idle pooling: every exchange opens its own connection and releases
        // it once the body is read or the request fails.
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| ApiError::InvalidRequest(format!("failed to build HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!("HTTP transport initialized for {}", base_url);

        Ok(Self { client, base_url })
    }

    /// Create a transport that authenticates with the `x-api-key` header
    pub fn with_api_key(
        base_url: impl Into<String>,
        api_key: &str,
        timeout: Duration,
    ) -> ApiResult<Self> {
        let mut value = HeaderValue::from_str(api_key)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid API key header: {e}")))?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, value);

        Self::new(base_url, headers, timeout)
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full request URL
    ///
    /// The query string is only appended when `params` is non-empty.
    pub fn build_url(&self, endpoint: &str, params: &[(&str, String)]) -> ApiResult<Url> {
        let raw = format!("{}{}", self.base_url, endpoint);
        let mut url = Url::parse(&raw)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid URL '{raw}': {e}")))?;

        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        }

        Ok(url)
    }

    /// Execute a GET request and decode the JSON body
    ///
    /// # Errors
    /// - [`ApiError::Http`] when the status is not 200
    /// - [`ApiError::Decode`] when a 200 body is not JSON
    /// - [`ApiError::Network`] when the request does not complete
    pub async fn get(&self, endpoint: &str, params: &[(&str, String)]) -> ApiResult<Value> {
        let url = self.build_url(endpoint, params)?;
        debug!("GET {}", url);

        let metrics = HttpRequestMetrics::start(endpoint);
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                metrics.record_network_error();
                return Err(network_error(e));
            }
        };

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(network_error)?;
        metrics.record_complete(status);
        debug!("Response: {}, {} bytes", status, body.len());

        if status != 200 {
            return Err(http_error(status, &body));
        }

        decode_body(&body)
    }

    /// Execute a POST request with a JSON body and decode the JSON response
    ///
    /// `body` defaults to an empty object. `Content-Type` and `Content-Length`
    /// always override the default headers. 200 and 201 count as success.
    pub async fn post(
        &self,
        endpoint: &str,
        body: Option<&Value>,
        params: &[(&str, String)],
    ) -> ApiResult<Value> {
        let url = self.build_url(endpoint, params)?;

        let empty = Value::Object(serde_json::Map::new());
        let payload = serde_json::to_vec(body.unwrap_or(&empty))
            .map_err(|e| ApiError::InvalidRequest(format!("failed to serialize body: {e}")))?;

        debug!("POST {} ({} bytes)", url, payload.len());

        let metrics = HttpRequestMetrics::start(endpoint);
        let response = match self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(CONTENT_LENGTH, payload.len())
            .body(payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                metrics.record_network_error();
                return Err(network_error(e));
            }
        };

        let status = response.status().as_u16();
        let response_body = response.bytes().await.map_err(network_error)?;
        metrics.record_complete(status);
        debug!("Response: {}, {} bytes", status, response_body.len());

        if status != 200 && status != 201 {
            return Err(http_error(status, &response_body));
        }

        decode_body(&response_body)
    }
}

fn decode_body(body: &[u8]) -> ApiResult<Value> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::Decode(format!("response is not valid JSON: {e}")))
}

/// Invalid UTF-8 sequences are dropped, not replaced
fn http_error(status: u16, body: &[u8]) -> ApiError {
    let message: String = String::from_utf8_lossy(body)
        .chars()
        .filter(|c| *c != char::REPLACEMENT_CHARACTER)
        .take(ERROR_BODY_LIMIT)
        .collect();
    ApiError::Http { status, message }
}

fn network_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Network(format!("request timeout: {e}"))
    } else {
        ApiError::Network(e.to_string())
    }
}
