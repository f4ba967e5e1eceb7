// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::models::crawl::{CrawlRequest, InputError};

/// 单次抓取请求体
///
/// 未知字段被忽略
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct CrawlRequestDto {
    #[validate(required, length(min = 1))]
    pub url: Option<String>,
}

impl CrawlRequestDto {
    /// 从原始请求体解析
    ///
    /// 空请求体视为 `{}`，非 JSON 或非对象返回 [`InputError::InvalidBody`]
    pub fn from_slice(body: &[u8]) -> Result<Self, InputError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|e| InputError::InvalidBody(e.to_string()))
    }
}

impl TryFrom<CrawlRequestDto> for CrawlRequest {
    type Error = InputError;

    fn try_from(dto: CrawlRequestDto) -> Result<Self, Self::Error> {
        dto.validate().map_err(|_| InputError::MissingUrl)?;
        CrawlRequest::new(dto.url.unwrap_or_default())
    }
}
