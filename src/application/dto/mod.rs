// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据传输对象模块
///
/// 定义 API 请求/响应体与领域模型之间的转换
pub mod crawl_request;
pub mod crawl_response;
