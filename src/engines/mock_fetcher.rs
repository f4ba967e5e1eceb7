// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

use crate::domain::models::crawl::RawContent;
use crate::engines::traits::{FetchError, PageFetcher};

/// 单次调用的脚本
#[derive(Debug, Clone)]
pub enum Step {
    Content(&'static str),
    Empty,
    Fail(&'static str),
    Panic,
}

/// 按脚本返回结果的抓取引擎，脚本用完后重复最后一步
pub struct MockFetcher {
    script: Mutex<VecDeque<Step>>,
    last: Mutex<Step>,
    latency: Duration,
    calls: Mutex<Vec<Instant>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockFetcher {
    pub fn new(steps: Vec<Step>) -> Self {
        let last = steps.last().cloned().unwrap_or(Step::Empty);
        Self {
            script: Mutex::new(steps.into()),
            last: Mutex::new(last),
            latency: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().clone()
    }

    /// 同一时刻并发执行 fetch 的最大数量
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, _url: &str) -> Result<RawContent, FetchError> {
        self.calls.lock().unwrap().push(Instant::now());
        let step = {
            let next = self.script.lock().unwrap().pop_front();
            next.unwrap_or_else(|| self.last.lock().unwrap().clone())
        };

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match step {
            Step::Content(text) => Ok(RawContent::new(text)),
            Step::Empty => Ok(RawContent::absent()),
            Step::Fail(message) => Err(FetchError::Other(message.to_string())),
            Step::Panic => panic!("mock fetcher exploded"),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
