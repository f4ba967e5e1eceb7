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
use thiserror::Error;

use crate::domain::models::crawl::RawContent;

/// 抓取引擎错误类型
///
/// 对重试循环而言，所有变体都是可重试的
#[derive(Error, Debug)]
pub enum FetchError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// URL 无法解析或协议不受支持
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    /// 非 2xx 响应
    #[error("Unexpected HTTP status {0}")]
    HttpStatus(u16),
    /// 超时
    #[error("Timeout")]
    Timeout,
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

/// 页面抓取与内容提取能力
///
/// 给定URL，返回页面提取后的 markdown 文本
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// 抓取页面并提取内容
    async fn fetch(&self, url: &str) -> Result<RawContent, FetchError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
