//! Top headlines fetcher
//!
//! Requests go through [`fetch_with_retry`], which reissues the same request
//! while the server answers 500, doubling the delay each time.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::NewsConfig;
use crate::http::{FetchError, HttpGet, HttpResponse, ensure_success};

/// Status that triggers a retry
const RETRY_STATUS: u16 = 500;

/// Errors raised by the news tool
#[derive(Debug, Error)]
pub enum NewsError {
    /// The API key was blank
    #[error("API key is required")]
    MissingApiKey,
    /// The request failed
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// Nothing to save
    #[error("no news to save")]
    NothingToSave,
    /// Writing the output failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parameters of a headlines request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    /// `NewsAPI` key
    pub api_key: String,
    /// Keyword filter
    pub query: Option<String>,
    /// Category filter (business, technology, ...)
    pub category: Option<String>,
    /// Article language
    pub language: String,
    /// Articles per page
    pub page_size: u32,
}

impl NewsQuery {
    /// Build a query with defaults from config
    pub fn new(
        api_key: &str,
        query: Option<String>,
        category: Option<String>,
        config: &NewsConfig,
    ) -> Result<Self, NewsError> {
        if api_key.trim().is_empty() {
            return Err(NewsError::MissingApiKey);
        }
        Ok(Self {
            api_key: api_key.trim().to_string(),
            query,
            category,
            language: config.language.clone(),
            page_size: config.page_size,
        })
    }

    /// Query parameters, leaving out absent or empty values
    #[must_use]
    pub fn params(&self) -> Vec<(String, String)> {
        let candidates = [
            ("apiKey", Some(self.api_key.clone())),
            ("language", Some(self.language.clone())),
            ("pageSize", Some(self.page_size.to_string())),
            ("q", self.query.clone()),
            ("category", self.category.clone()),
        ];
        candidates
            .into_iter()
            .filter_map(|(key, value)| {
                value.filter(|v| !v.trim().is_empty()).map(|v| (key.to_string(), v))
            })
            .collect()
    }
}

/// Retry-on-500 policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first request
    pub retries: u32,
    /// Delay before the first retry; doubled after each one
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Policy from config
    #[must_use]
    pub const fn from_config(config: &NewsConfig) -> Self {
        Self {
            retries: config.retries,
            base_delay: Duration::from_secs(config.base_delay_secs),
        }
    }
}

/// Issue a GET, reissuing it with the same parameters while the status is
/// 500 and retries remain. The last response is returned as is.
pub async fn fetch_with_retry<C: HttpGet>(
    client: &C,
    url: &str,
    params: &[(String, String)],
    policy: RetryPolicy,
) -> Result<HttpResponse, FetchError> {
    let mut response = client.get(url, params).await?;
    let mut delay = policy.base_delay;
    let mut attempt = 0;

    while response.status == RETRY_STATUS && attempt < policy.retries {
        attempt += 1;
        log::warn!("server error, retrying in {}s (attempt {attempt})", delay.as_secs_f64());
        tokio::time::sleep(delay).await;
        delay = delay.saturating_mul(2);
        response = client.get(url, params).await?;
    }

    if response.status != 200 {
        log::error!("final attempt returned status {}", response.status);
    }
    Ok(response)
}

/// Article source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Publisher name
    #[serde(default)]
    pub name: Option<String>,
}

/// One headline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Headline
    #[serde(default)]
    pub title: Option<String>,
    /// Publisher
    #[serde(default)]
    pub source: Source,
    /// Publication time as sent by the API
    #[serde(default)]
    pub published_at: Option<String>,
    /// Link to the article
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArticlesEnvelope {
    #[serde(default)]
    articles: Vec<Article>,
}

/// Fetch headlines with retry; only a 200 response yields articles
pub async fn get_news<C: HttpGet>(
    client: &C,
    endpoint: &str,
    query: &NewsQuery,
    policy: RetryPolicy,
) -> Result<Vec<Article>, NewsError> {
    let params = query.params();
    log::info!("requesting headlines from {endpoint}");
    let response = fetch_with_retry(client, endpoint, &params, policy).await?;

    if response.status != 200 {
        let status = response.status;
        let err = match ensure_success(response, endpoint) {
            Err(e) => e,
            Ok(_) => FetchError::Status {
                status,
                url: endpoint.to_string(),
                message: "expected 200 OK".to_string(),
            },
        };
        return Err(err.into());
    }

    let envelope: ArticlesEnvelope = response.json()?;
    log::info!("fetched {} articles", envelope.articles.len());
    Ok(envelope.articles)
}

fn or_na(value: Option<&String>) -> &str {
    value.map_or("N/A", String::as_str)
}

/// Publication time in a friendlier form when it parses as RFC 3339
#[must_use]
pub fn format_published(value: Option<&String>) -> String {
    value.map_or_else(
        || "N/A".to_string(),
        |raw| {
            chrono::DateTime::parse_from_rfc3339(raw).map_or_else(
                |_| raw.clone(),
                |dt| dt.with_timezone(&chrono::Utc).format("%Y-%m-%d %H:%M UTC").to_string(),
            )
        },
    )
}

/// Render numbered article blocks as written to the output file
#[must_use]
pub fn render_articles(articles: &[Article]) -> String {
    let mut out = String::new();
    for (idx, article) in articles.iter().enumerate() {
        let _ = write!(
            out,
            "{}. {}\nSource: {}\nPublished: {}\nLink: {}\n\n",
            idx + 1,
            or_na(article.title.as_ref()),
            or_na(article.source.name.as_ref()),
            or_na(article.published_at.as_ref()),
            or_na(article.url.as_ref()),
        );
    }
    out
}

/// Save articles to `path`
pub fn save_articles(path: &Path, articles: &[Article]) -> Result<(), NewsError> {
    if articles.is_empty() {
        return Err(NewsError::NothingToSave);
    }
    fs::write(path, render_articles(articles))?;
    log::info!("news saved to {}", path.display());
    Ok(())
}
