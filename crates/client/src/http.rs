//! HTTP transport: thin reqwest wrapper and the materialized request type.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as ReqwestClient, Method, StatusCode};
use tracing::debug;
use url::Url;

use crate::errors::{ClientError, Result};

/// Fixed per-request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Response from an executed request.
///
/// `body` is `None` for a `304 Not Modified` answer to a conditional GET.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Option<Vec<u8>>,
    pub headers: HeaderMap,
}

/// A materialized transport request: verb, URL, headers, query parameters
/// and an optional JSON body, ready to be executed exactly once.
#[derive(Debug)]
pub struct HttpRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    params: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl HttpRequest {
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self { method, url, headers: HeaderMap::new(), params: Vec::new(), body: None }
    }

    /// Set a header, replacing any previous value.
    pub fn set_header(&mut self, name: &str, value: &str) -> Result<()> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|err| ClientError::Request(format!("invalid header name {name:?}: {err}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|err| ClientError::Request(format!("invalid header value: {err}")))?;
        self.headers.insert(name, value);
        Ok(())
    }

    /// Set a query parameter, replacing any previous value for the same key.
    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        match self.params.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value.into(),
            None => self.params.push((key, value.into())),
        }
    }

    /// Attach a request body.
    pub fn set_body(&mut self, body: Vec<u8>) {
        self.body = Some(body);
    }

    /// The target URL of the materialized request.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Value of a query parameter, if set.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.iter().find(|(existing, _)| existing == key).map(|(_, value)| value.as_str())
    }
}

/// Shared HTTP transport with a fixed per-request timeout.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    #[must_use]
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Execute a materialized request.
    ///
    /// Status handling follows the API contract: `200` returns the body and
    /// headers, `304` returns headers with no body, anything else is an error
    /// carrying the status code. Transport failures propagate unchanged.
    pub async fn execute(&self, request: HttpRequest) -> Result<ApiResponse> {
        let mut url = request.url;
        if !request.params.is_empty() {
            url.query_pairs_mut().clear().extend_pairs(&request.params);
        }

        let method = request.method;
        debug!(%method, %url, "sending API request");

        let mut builder = self.client.request(method.clone(), url.clone()).headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        debug!(%method, %url, %status, "received API response");

        match status {
            StatusCode::OK => {
                let headers = response.headers().clone();
                let body = response.bytes().await?;
                Ok(ApiResponse { status, body: Some(body.to_vec()), headers })
            }
            // No body travels with a 304.
            StatusCode::NOT_MODIFIED => {
                Ok(ApiResponse { status, body: None, headers: response.headers().clone() })
            }
            _ => Err(ClientError::UnexpectedStatus { status: status.as_u16() }),
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS), user_agent: None }
    }
}

impl HttpClientBuilder {
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder
            .build()
            .map_err(|err| ClientError::Config(format!("failed to build transport: {err}")))?;

        Ok(HttpClient { client })
    }
}
