// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 爬取（crawl）：请求、原始内容、清洗结果、单次尝试结果和周期结局
pub mod crawl;
