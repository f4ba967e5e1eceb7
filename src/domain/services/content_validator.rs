// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl::RawContent;

/// 内容分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentClass<'a> {
    /// 可用内容
    Usable(&'a str),
    /// 页面可达但没有产出任何内容
    Empty,
}

/// 内容校验器
///
/// 可用的定义：内容存在，并且去掉首尾空白后非空
pub struct ContentValidator;

impl ContentValidator {
    pub fn classify(raw: &RawContent) -> ContentClass<'_> {
        match raw.as_deref() {
            Some(text) if !text.trim().is_empty() => ContentClass::Usable(text),
            _ => ContentClass::Empty,
        }
    }
}
