// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use futures::FutureExt;
use metrics::counter;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::domain::models::crawl::{AttemptOutcome, CrawlError, CrawlOutcome};
use crate::domain::services::content_validator::{ContentClass, ContentValidator};
use crate::domain::services::markdown_sanitizer::MarkdownSanitizer;
use crate::engines::traits::PageFetcher;
use crate::utils::retry_policy::RetryPolicy;

/// 重试执行器
///
/// 驱动最多 `max_attempts` 次 {抓取 → 校验 → 清洗}。
/// 抓取失败和空内容都会重试；尝试内部的 panic 会立即终止循环，不再重试。
pub struct RetryExecutor {
    /// 抓取引擎
    fetcher: Arc<dyn PageFetcher>,
    /// 清洗器
    sanitizer: Arc<MarkdownSanitizer>,
    /// 重试策略
    policy: RetryPolicy,
}

impl RetryExecutor {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        sanitizer: Arc<MarkdownSanitizer>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            fetcher,
            sanitizer,
            policy,
        }
    }

    /// 执行完整的重试循环
    ///
    /// # 参数
    ///
    /// * `url` - 目标URL
    ///
    /// # 返回值
    ///
    /// 周期的最终结果，可重试的错误不会逃出这个函数
    pub async fn run(&self, url: &str) -> CrawlOutcome {
        let max_attempts = self.policy.max_attempts();
        let mut attempt = 1;

        loop {
            debug!(attempt, max_attempts, engine = self.fetcher.name(), "Starting attempt");

            let outcome = match AssertUnwindSafe(self.attempt(url)).catch_unwind().await {
                Ok(outcome) => outcome,
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    error!(attempt, %message, "Attempt panicked, aborting cycle");
                    counter!("crawl_attempts_total", "result" => "panic").increment(1);
                    return CrawlOutcome::UnexpectedError(CrawlError::Panicked(message));
                }
            };

            let exhausted = !self.policy.should_retry(attempt);
            match outcome {
                AttemptOutcome::Success(document) => {
                    counter!("crawl_attempts_total", "result" => "success").increment(1);
                    info!(attempt, bytes = document.as_str().len(), "Attempt succeeded");
                    return CrawlOutcome::Success(document);
                }
                AttemptOutcome::EmptyContent => {
                    counter!("crawl_attempts_total", "result" => "empty").increment(1);
                    if exhausted {
                        warn!(attempt, "Retries exhausted, page yielded no content");
                        return CrawlOutcome::NoContent;
                    }
                    warn!(attempt, "Attempt yielded no content, retrying");
                }
                AttemptOutcome::TransientFailure(cause) => {
                    counter!("crawl_attempts_total", "result" => "failure").increment(1);
                    if exhausted {
                        error!(attempt, error = %cause, "Retries exhausted");
                        return CrawlOutcome::RetryExhausted {
                            attempts: attempt,
                            last_cause: cause,
                        };
                    }
                    warn!(attempt, error = %cause, "Attempt failed, retrying");
                }
            }

            tokio::time::sleep(self.policy.delay()).await;
            attempt += 1;
        }
    }

    /// 单次尝试
    async fn attempt(&self, url: &str) -> AttemptOutcome {
        let raw = match self.fetcher.fetch(url).await {
            Ok(raw) => raw,
            Err(e) => return AttemptOutcome::TransientFailure(e),
        };

        match ContentValidator::classify(&raw) {
            ContentClass::Usable(text) => AttemptOutcome::Success(self.sanitizer.sanitize(text)),
            ContentClass::Empty => AttemptOutcome::EmptyContent,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
#[path = "retry_executor_test.rs"]
mod tests;
