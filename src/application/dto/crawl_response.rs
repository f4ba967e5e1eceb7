// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::domain::models::crawl::CleanedDocument;

/// 成功响应体
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrawlResponseDto {
    pub markdown: String,
}

impl From<CleanedDocument> for CrawlResponseDto {
    fn from(document: CleanedDocument) -> Self {
        Self {
            markdown: document.into_string(),
        }
    }
}

/// 错误响应体
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponseDto {
    pub error: String,
}

impl ErrorResponseDto {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
