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

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, redirect, Client};
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

use crate::config::settings::FetcherSettings;
use crate::domain::models::crawl::RawContent;
use crate::engines::traits::{FetchError, PageFetcher};
use crate::utils::html_to_markdown::html_to_markdown;

/// 抓取引擎
///
/// 基于reqwest实现的HTTP抓取引擎，HTML 响应转换为 markdown，其他文本原样返回。
/// 每次抓取使用独立的客户端，cookie 不会在请求之间传递。
pub struct ReqwestEngine {
    user_agent: String,
    timeout: Duration,
    max_redirects: usize,
}

impl ReqwestEngine {
    /// 根据配置创建引擎
    ///
    /// # 参数
    ///
    /// * `settings` - 抓取引擎配置
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestEngine)` - 引擎实例
    /// * `Err(FetchError)` - 配置无法构建 HTTP 客户端
    pub fn new(settings: &FetcherSettings) -> Result<Self, FetchError> {
        let engine = Self {
            user_agent: settings.user_agent.clone(),
            timeout: settings.timeout(),
            max_redirects: settings.max_redirects,
        };
        // 启动时先构建一次，配置错误尽早暴露
        engine.client()?;
        Ok(engine)
    }

    /// 为单次抓取构建客户端，cookie 只在本次抓取的重定向链内有效
    fn client(&self) -> Result<Client, FetchError> {
        let client = Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(self.timeout)
            .redirect(redirect::Policy::limited(self.max_redirects))
            .cookie_store(true)
            .build()?;
        Ok(client)
    }
}

/// 只接受 http(s) 绝对地址
fn parse_target(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(FetchError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", scheme),
        }),
    }
}

fn classify(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::RequestFailed(error)
    }
}

#[async_trait]
impl PageFetcher for ReqwestEngine {
    async fn fetch(&self, url: &str) -> Result<RawContent, FetchError> {
        let target = parse_target(url)?;

        let start = Instant::now();
        let response = self
            .client()?
            .get(target).send().await.map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        // 缺省按 HTML 处理
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_ascii_lowercase())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "text/html".to_string());

        let body = response.text().await.map_err(classify)?;

        debug!(
            url,
            status = status.as_u16(),
            content_type = content_type.as_str(),
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Fetched page"
        );

        let markdown = if content_type.contains("html") {
            html_to_markdown(&body)
        } else {
            body
        };

        Ok(RawContent::new(markdown))
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
