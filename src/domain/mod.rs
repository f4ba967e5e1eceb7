// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：请求、原始内容、清洗结果和周期结局
/// - 服务（services）：闸门、重试、校验和清洗
///
/// 领域层不依赖 HTTP 框架，只通过 PageFetcher 接口接触抓取引擎。
pub mod models;
pub mod services;
