//! Tests for the news fetcher

use std::fs;
use std::time::Duration;

use crate::common::MockHttp;
use tempfile::TempDir;
use toolbelt::config::NewsConfig;
use toolbelt::http::FetchError;
use toolbelt::news::{
    Article, NewsError, NewsQuery, RetryPolicy, Source, fetch_with_retry, format_published,
    get_news, render_articles, save_articles,
};

const ENDPOINT: &str = "http://news.test/v2/top-headlines";

const ARTICLES: &str = r#"{"status":"ok","totalResults":1,"articles":[
    {"source":{"id":null,"name":"Example Times"},"title":"Headline","publishedAt":"2024-12-30T09:15:00Z","url":"http://example.com/a"}
]}"#;

fn no_wait(retries: u32) -> RetryPolicy {
    RetryPolicy {
        retries,
        base_delay: Duration::ZERO,
    }
}

fn query() -> NewsQuery {
    NewsQuery::new("secret", None, None, &NewsConfig::default()).unwrap()
}

// =============================================================================
// Query
// =============================================================================

#[test]
fn test_blank_key_rejected() {
    let err = NewsQuery::new("  ", None, None, &NewsConfig::default()).unwrap_err();
    assert!(matches!(err, NewsError::MissingApiKey));
}

#[test]
fn test_params_omit_empty_values() {
    let q = NewsQuery::new("k", Some(String::new()), Some("business".to_string()), &NewsConfig::default())
        .unwrap();
    let params = q.params();
    let keys: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, ["apiKey", "language", "pageSize", "category"]);
    assert!(params.contains(&("pageSize".to_string(), "5".to_string())));
    assert!(params.contains(&("language".to_string(), "en".to_string())));
}

// =============================================================================
// Retry
// =============================================================================

#[tokio::test]
async fn test_retry_500_then_200() {
    let http = MockHttp::new().respond(500, "").respond(200, ARTICLES);

    let articles = get_news(&http, ENDPOINT, &query(), no_wait(3)).await.unwrap();

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title.as_deref(), Some("Headline"));
    assert_eq!(http.calls(), 2);
}

#[tokio::test]
async fn test_retry_reuses_params() {
    let http = MockHttp::new().respond(500, "").respond(500, "").respond(200, ARTICLES);
    let params = query().params();

    fetch_with_retry(&http, ENDPOINT, &params, no_wait(3)).await.unwrap();

    let requests = http.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|r| r.query == params && r.url == ENDPOINT));
}

#[tokio::test]
async fn test_retry_exhausted_returns_last_response() {
    let http = MockHttp::new()
        .respond(500, "1")
        .respond(500, "2")
        .respond(500, "3")
        .respond(500, "4")
        .respond(200, ARTICLES);

    let response = fetch_with_retry(&http, ENDPOINT, &[], no_wait(3)).await.unwrap();

    assert_eq!(response.status, 500);
    assert_eq!(response.body, "4");
    assert_eq!(http.calls(), 4);
}

#[tokio::test]
async fn test_no_retry_on_other_errors() {
    let http = MockHttp::new().respond(401, r#"{"status":"error","message":"bad key"}"#);

    let err = get_news(&http, ENDPOINT, &query(), no_wait(3)).await.unwrap_err();

    assert_eq!(http.calls(), 1);
    match err {
        NewsError::Fetch(FetchError::Status { status, message, .. }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "bad key");
        },
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_200_success_is_error() {
    let http = MockHttp::new().respond(204, "");
    let err = get_news(&http, ENDPOINT, &query(), no_wait(0)).await.unwrap_err();
    assert!(matches!(err, NewsError::Fetch(FetchError::Status { status: 204, .. })));
}

#[tokio::test]
async fn test_transport_error_ends_retry() {
    let http = MockHttp::new().respond(500, "").fail("reset");
    let err = fetch_with_retry(&http, ENDPOINT, &[], no_wait(3)).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }));
    assert_eq!(http.calls(), 2);
}

// =============================================================================
// Output
// =============================================================================

#[test]
fn test_render_articles_with_missing_fields() {
    let articles = vec![
        Article {
            title: Some("First".to_string()),
            source: Source {
                name: Some("Wire".to_string()),
            },
            published_at: Some("2024-01-01T00:00:00Z".to_string()),
            url: Some("http://a".to_string()),
        },
        Article::default(),
    ];
    let text = render_articles(&articles);
    assert!(text.starts_with("1. First\nSource: Wire\nPublished: 2024-01-01T00:00:00Z\nLink: http://a\n\n"));
    assert!(text.ends_with("2. N/A\nSource: N/A\nPublished: N/A\nLink: N/A\n\n"));
}

#[test]
fn test_format_published() {
    let raw = "2024-12-30T09:15:00+02:00".to_string();
    assert_eq!(format_published(Some(&raw)), "2024-12-30 07:15 UTC");
    let odd = "yesterday".to_string();
    assert_eq!(format_published(Some(&odd)), "yesterday");
    assert_eq!(format_published(None), "N/A");
}

#[test]
fn test_save_articles() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("news_today.txt");

    assert!(matches!(save_articles(&path, &[]), Err(NewsError::NothingToSave)));
    assert!(!path.exists());

    save_articles(&path, &[Article::default()]).unwrap();
    assert!(fs::read_to_string(&path).unwrap().starts_with("1. N/A"));
}
