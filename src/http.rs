//! HTTP port shared by the network tools
//!
//! Every fetcher in this crate talks to the network through [`HttpGet`], a
//! single GET operation. [`ReqwestClient`] is the production
//! adapter; tests plug in a scripted fake.

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

/// User agent sent with every request
const USER_AGENT: &str = concat!("toolbelt/", env!("CARGO_PKG_VERSION"));

/// Longest body excerpt carried inside an error message
const BODY_PREVIEW_LIMIT: usize = 200;

/// Errors raised while fetching or decoding a remote resource
#[derive(Debug, Error)]
pub enum FetchError {
    /// The endpoint could not be turned into a URL
    #[error("invalid url '{url}': {message}")]
    InvalidUrl {
        /// The offending URL
        url: String,
        /// Parser message
        message: String,
    },

    /// The request never produced a response (DNS, connect, timeout, ...)
    #[error("request to {url} failed: {message}")]
    Transport {
        /// Requested URL
        url: String,
        /// Transport error message
        message: String,
    },

    /// The server answered with a non-success status
    #[error("{url} returned status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
        /// Message extracted from the body, or a body preview
        message: String,
    },

    /// The body was not the JSON we expected
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response decoded fine but carried nothing usable
    #[error("no {0} in response")]
    Empty(&'static str),
}

/// A fully read HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl HttpResponse {
    /// Create a response from a status and body
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Port for issuing GET requests
pub trait HttpGet {
    /// GET `url` with the given query parameters and read the whole body.
    ///
    /// Non-success statuses are returned as responses, not errors; only a
    /// missing response is an error here.
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse, FetchError>;
}

/// [`HttpGet`] backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Build a client with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Transport {
                url: String::new(),
                message: e.to_string(),
            })?;
        Ok(Self { inner })
    }
}

impl HttpGet for ReqwestClient {
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse, FetchError> {
        let full_url = build_url(url, query)?;
        log::debug!("GET {full_url}");

        let response = self.inner.get(full_url).send().await.map_err(|e| {
            FetchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        log::debug!("GET {url} -> {status} ({} bytes)", body.len());

        Ok(HttpResponse { status, body })
    }
}

/// Encode query parameters into `url`
pub fn build_url(url: &str, query: &[(String, String)]) -> Result<reqwest::Url, FetchError> {
    let parsed = if query.is_empty() {
        reqwest::Url::parse(url)
    } else {
        reqwest::Url::parse_with_params(url, query.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    };
    parsed.map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Turn a non-2xx response into [`FetchError::Status`]
///
/// When the body is a JSON object with a `message` field (as most public
/// APIs return on error) that message is used, otherwise a body preview.
pub fn ensure_success(response: HttpResponse, url: &str) -> Result<HttpResponse, FetchError> {
    if response.is_success() {
        return Ok(response);
    }

    let message = serde_json::from_str::<serde_json::Value>(&response.body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| preview_body(&response.body));

    Err(FetchError::Status {
        status: response.status,
        url: url.to_string(),
        message,
    })
}

/// Short single-line excerpt of a response body
#[must_use]
pub fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }
    if trimmed.chars().count() <= BODY_PREVIEW_LIMIT {
        return trimmed.to_string();
    }
    let mut preview: String = trimmed.chars().take(BODY_PREVIEW_LIMIT).collect();
    preview.push_str("...");
    preview
}
