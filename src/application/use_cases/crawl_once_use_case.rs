// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use metrics::{counter, histogram};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn, Instrument};

use crate::domain::{
    models::crawl::{CrawlError, CrawlOutcome, CrawlRequest},
    services::{
        request_gate::{GatePass, RequestGate},
        retry_executor::RetryExecutor,
    },
};

/// 单次抓取用例
///
/// 获取全局闸门，在闸门内驱动重试执行器，结束后释放闸门
pub struct CrawlOnceUseCase {
    /// 全局请求闸门
    gate: RequestGate,
    /// 重试执行器
    executor: Arc<RetryExecutor>,
    /// 周期时限，`None` 表示不限制
    cycle_timeout: Option<Duration>,
}

impl CrawlOnceUseCase {
    pub fn new(gate: RequestGate, executor: RetryExecutor) -> Self {
        Self {
            gate,
            executor: Arc::new(executor),
            cycle_timeout: None,
        }
    }

    /// 为周期设置时限
    ///
    /// 时限只覆盖闸门内的执行，不包括等待闸门的时间。
    /// 超时后周期被取消，闸门随之释放。
    pub fn with_cycle_timeout(mut self, cycle_timeout: Option<Duration>) -> Self {
        self.cycle_timeout = cycle_timeout;
        self
    }

    pub fn gate(&self) -> &RequestGate {
        &self.gate
    }

    /// 执行一个完整周期
    ///
    /// 拿到闸门后周期在独立任务中运行。调用方中途被丢弃（客户端断开）
    /// 只会放弃等待结果，已开始的周期照常跑完并释放闸门。
    pub async fn execute(&self, request: &CrawlRequest) -> CrawlOutcome {
        let pass = match self.gate.acquire().await {
            Ok(pass) => pass,
            Err(e) => {
                warn!("Rejecting crawl: {}", e);
                return finish(CrawlOutcome::UnexpectedError(e.into()), Duration::ZERO);
            }
        };

        let cycle = run_cycle(
            pass,
            self.executor.clone(),
            request.url().to_string(),
            self.cycle_timeout,
        );
        match tokio::spawn(cycle.in_current_span()).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Crawl cycle task failed: {}", e);
                CrawlOutcome::UnexpectedError(CrawlError::Aborted(e.to_string()))
            }
        }
    }
}

/// 在闸门内跑完一个周期，结束后释放闸门并记录结果
async fn run_cycle(
    pass: GatePass,
    executor: Arc<RetryExecutor>,
    url: String,
    cycle_timeout: Option<Duration>,
) -> CrawlOutcome {
    let started = Instant::now();
    let outcome = match cycle_timeout {
        Some(limit) => match tokio::time::timeout(limit, executor.run(&url)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                error!(timeout_ms = limit.as_millis() as u64, "Crawl cycle timed out");
                CrawlOutcome::UnexpectedError(CrawlError::TimedOut(limit))
            }
        },
        None => executor.run(&url).await,
    };
    drop(pass);

    finish(outcome, started.elapsed())
}

fn finish(outcome: CrawlOutcome, elapsed: Duration) -> CrawlOutcome {
    histogram!("crawl_cycle_duration_seconds").record(elapsed.as_secs_f64());
    counter!("crawl_outcomes_total", "outcome" => outcome.kind()).increment(1);
    info!(
        outcome = outcome.kind(),
        elapsed_ms = elapsed.as_millis() as u64,
        "Crawl cycle finished"
    );
    outcome
}
