// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;
use thiserror::Error;

use crate::domain::services::request_gate::GateClosed;
use crate::engines::traits::FetchError;

/// 请求层输入错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// 缺少 url 字段或为空字符串
    #[error("Missing 'url'")]
    MissingUrl,
    /// 请求体不是合法的 JSON 对象
    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),
}

/// 单次爬取请求
///
/// 只能通过 [`CrawlRequest::new`] 构造，保证 `url` 非空
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    url: String,
}

impl CrawlRequest {
    /// 创建爬取请求
    ///
    /// # 参数
    ///
    /// * `url` - 目标URL
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlRequest)` - url 非空
    /// * `Err(InputError::MissingUrl)` - url 为空
    pub fn new(url: impl Into<String>) -> Result<Self, InputError> {
        let url = url.into();
        if url.is_empty() {
            return Err(InputError::MissingUrl);
        }
        Ok(Self { url })
    }

    /// 目标URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// 抓取引擎单次返回的原始内容
///
/// `None` 表示引擎未能提取出任何 markdown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawContent {
    markdown: Option<String>,
}

impl RawContent {
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            markdown: Some(markdown.into()),
        }
    }

    /// 引擎没有产出任何内容
    pub fn absent() -> Self {
        Self { markdown: None }
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.markdown.as_deref()
    }
}

/// 清洗后的文档
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedDocument(String);

impl CleanedDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// 单次尝试的结果
#[derive(Debug)]
pub enum AttemptOutcome {
    /// 抓取并清洗成功
    Success(CleanedDocument),
    /// 页面可达但没有可用内容
    EmptyContent,
    /// 抓取引擎失败
    TransientFailure(FetchError),
}

/// 重试循环之外的非预期错误
#[derive(Error, Debug)]
pub enum CrawlError {
    /// 某次尝试内部发生 panic
    #[error("attempt panicked: {0}")]
    Panicked(String),
    /// 整个周期超过了配置的时限
    #[error("cycle timed out after {0:?}")]
    TimedOut(Duration),
    /// 周期任务异常结束（运行时关闭等）
    #[error("cycle task aborted: {0}")]
    Aborted(String),
    /// 服务正在关闭
    #[error(transparent)]
    GateClosed(#[from] GateClosed),
}

/// 一个完整周期的最终结果
///
/// 只由 ResponseMapper 消费一次
#[derive(Debug)]
pub enum CrawlOutcome {
    Success(CleanedDocument),
    NoContent,
    RetryExhausted { attempts: u32, last_cause: FetchError },
    UnexpectedError(CrawlError),
}

impl CrawlOutcome {
    /// 结果类别，用于日志和指标标签
    pub fn kind(&self) -> &'static str {
        match self {
            CrawlOutcome::Success(_) => "success",
            CrawlOutcome::NoContent => "no_content",
            CrawlOutcome::RetryExhausted { .. } => "retry_exhausted",
            CrawlOutcome::UnexpectedError(_) => "unexpected_error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CrawlOutcome::Success(_))
    }
}
