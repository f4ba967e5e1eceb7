// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use std::sync::Arc;
use std::time::Duration;

use super::helpers::{app, json, post_crawl, post_crawl_to, StubFetcher};

#[tokio::test]
async fn missing_url_is_rejected_without_fetching() {
    let fetcher = Arc::new(StubFetcher::content("# Never"));

    for body in [r#"{}"#, r#"{"url": null}"#, r#"{"url": ""}"#, ""] {
        let (status, response) = post_crawl(app(fetcher.clone()), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json(&response), serde_json::json!({ "error": "Missing 'url'" }));
    }
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn malformed_body_is_rejected_without_fetching() {
    let fetcher = Arc::new(StubFetcher::content("# Never"));

    let (status, response) = post_crawl(app(fetcher.clone()), "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = json(&response)["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("Invalid JSON body"), "got {}", error);
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn successful_crawl_returns_cleaned_markdown() {
    let fetcher = Arc::new(StubFetcher::content(
        "Menu | Login\n# Title\nSee [docs](https://example.com/docs)  now\n\n\n\nBye",
    ));

    let (status, response) =
        post_crawl(app(fetcher.clone()), r#"{"url": "https://example.com"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json(&response),
        serde_json::json!({ "markdown": "# Title\nSee docs now\n\nBye" })
    );
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn empty_page_returns_no_content_after_all_attempts() {
    let fetcher = Arc::new(StubFetcher::empty());

    let (status, response) =
        post_crawl(app(fetcher.clone()), r#"{"url": "https://example.com"}"#).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(response.is_empty());
    assert_eq!(fetcher.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn failing_fetch_returns_server_error_with_last_cause() {
    let fetcher = Arc::new(StubFetcher::failing("upstream down"));

    let (status, response) =
        post_crawl(app(fetcher.clone()), r#"{"url": "https://example.com"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json(&response),
        serde_json::json!({ "error": "Crawl failed: Other error: upstream down (after 3 attempts)" })
    );
    assert_eq!(fetcher.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn concurrent_requests_are_serialized() {
    let fetcher =
        Arc::new(StubFetcher::content("# Page").with_latency(Duration::from_millis(500)));
    let router = app(fetcher.clone());

    let requests: Vec<_> = (0..3)
        .map(|_| {
            let router = router.clone();
            tokio::spawn(async move {
                post_crawl(router, r#"{"url": "https://example.com"}"#).await
            })
        })
        .collect();

    for request in requests {
        let (status, _) = request.await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }

    let mut windows = fetcher.windows();
    windows.sort();
    assert_eq!(windows.len(), 3);
    for pair in windows.windows(2) {
        let (_, previous_end) = pair[0];
        let (next_start, _) = pair[1];
        assert!(next_start >= previous_end);
    }
}

#[tokio::test]
async fn legacy_path_behaves_like_versioned_path() {
    let fetcher = Arc::new(StubFetcher::content("# Title\nBody"));

    let (status, response) = post_crawl_to(
        app(fetcher.clone()),
        "/crawl4ai_once",
        r#"{"url": "https://example.com"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&response), serde_json::json!({ "markdown": "# Title\nBody" }));

    let (status, response) = post_crawl_to(app(fetcher.clone()), "/crawl4ai_once", "{}").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&response), serde_json::json!({ "error": "Missing 'url'" }));
    assert_eq!(fetcher.calls(), 1);
}
