// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use crawlonce::application::use_cases::crawl_once_use_case::CrawlOnceUseCase;
use crawlonce::domain::models::crawl::RawContent;
use crawlonce::domain::services::{
    markdown_sanitizer::MarkdownSanitizer, request_gate::RequestGate,
    retry_executor::RetryExecutor,
};
use crawlonce::engines::traits::{FetchError, PageFetcher};
use crawlonce::presentation::routes;
use crawlonce::utils::retry_policy::RetryPolicy;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use tower::util::ServiceExt;

/// 固定返回同一结果的抓取引擎，记录每次调用的起止时间
pub struct StubFetcher {
    reply: Result<Option<&'static str>, &'static str>,
    latency: Duration,
    windows: Mutex<Vec<(Instant, Instant)>>,
}

impl StubFetcher {
    pub fn content(markdown: &'static str) -> Self {
        Self::with_reply(Ok(Some(markdown)))
    }

    pub fn empty() -> Self {
        Self::with_reply(Ok(None))
    }

    pub fn failing(message: &'static str) -> Self {
        Self::with_reply(Err(message))
    }

    fn with_reply(reply: Result<Option<&'static str>, &'static str>) -> Self {
        Self {
            reply,
            latency: Duration::ZERO,
            windows: Mutex::new(Vec::new()),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> usize {
        self.windows.lock().unwrap().len()
    }

    pub fn windows(&self) -> Vec<(Instant, Instant)> {
        self.windows.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, _url: &str) -> Result<RawContent, FetchError> {
        let start = Instant::now();
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.windows.lock().unwrap().push((start, Instant::now()));

        match self.reply {
            Ok(Some(markdown)) => Ok(RawContent::new(markdown)),
            Ok(None) => Ok(RawContent::absent()),
            Err(message) => Err(FetchError::Other(message.to_string())),
        }
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// 用给定的抓取引擎和重试策略组装完整路由
pub fn app_with(fetcher: Arc<dyn PageFetcher>, policy: RetryPolicy) -> Router {
    let executor = RetryExecutor::new(fetcher, Arc::new(MarkdownSanitizer::default()), policy);
    let use_case = Arc::new(CrawlOnceUseCase::new(RequestGate::new(), executor));
    routes::routes(use_case)
}

pub fn app(fetcher: Arc<StubFetcher>) -> Router {
    app_with(fetcher, RetryPolicy::default())
}

/// 发送 `POST /v1/crawl_once`，返回状态码和原始响应体
pub async fn post_crawl(app: Router, body: &str) -> (StatusCode, Vec<u8>) {
    post_crawl_to(app, "/v1/crawl_once", body).await
}

pub async fn post_crawl_to(app: Router, uri: &str, body: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .uri(uri)
                .method("POST")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

pub fn json(body: &[u8]) -> serde_json::Value {
    serde_json::from_slice(body).unwrap()
}
