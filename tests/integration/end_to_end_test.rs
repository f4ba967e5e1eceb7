// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 使用真实 HTTP 引擎和 wiremock 上游的端到端测试

use axum::http::StatusCode;
use crawlonce::config::settings::FetcherSettings;
use crawlonce::engines::reqwest_engine::ReqwestEngine;
use crawlonce::utils::retry_policy::RetryPolicy;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::helpers::{app_with, json, post_crawl};

const ARTICLE: &str = r#"<html>
<head><title>Shop</title><script>track();</script></head>
<body>
<nav><a href="/">Home</a> <a href="/about">About</a></nav>
<h1>Article</h1>
<p>Read the <a href="https://example.com/guide">guide</a> first.</p>
<h2>連絡詢問</h2>
<p>call us</p>
</body>
</html>"#;

fn engine() -> Arc<ReqwestEngine> {
    let settings = FetcherSettings {
        timeout_secs: 5,
        user_agent: "crawlonce-test".to_string(),
        max_redirects: 5,
    };
    Arc::new(ReqwestEngine::new(&settings).unwrap())
}

fn fast_retries() -> RetryPolicy {
    RetryPolicy::fixed(3, Duration::from_millis(10))
}

fn crawl_body(url: String) -> String {
    serde_json::json!({ "url": url }).to_string()
}

#[tokio::test]
async fn article_is_fetched_converted_and_sanitized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(ARTICLE, "text/html; charset=utf-8"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, response) = post_crawl(
        app_with(engine(), fast_retries()),
        &crawl_body(format!("{}/article", mock_server.uri())),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json(&response),
        serde_json::json!({ "markdown": "# Article\n\nRead the guide first." })
    );
}

#[tokio::test]
async fn upstream_errors_are_retried_then_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let (status, response) = post_crawl(
        app_with(engine(), fast_retries()),
        &crawl_body(format!("{}/broken", mock_server.uri())),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json(&response),
        serde_json::json!({ "error": "Crawl failed: Unexpected HTTP status 500 (after 3 attempts)" })
    );
}

#[tokio::test]
async fn blank_page_yields_no_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/blank"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html><body>  </body></html>", "text/html"),
        )
        .expect(3)
        .mount(&mock_server)
        .await;

    let (status, response) = post_crawl(
        app_with(engine(), fast_retries()),
        &crawl_body(format!("{}/blank", mock_server.uri())),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(response.is_empty());
}

#[tokio::test]
async fn unsupported_scheme_is_a_server_error() {
    let (status, response) = post_crawl(
        app_with(engine(), fast_retries()),
        r#"{"url": "ftp://example.com/file"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = json(&response)["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("Crawl failed: Invalid URL 'ftp://example.com/file'"));
}
