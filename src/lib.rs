// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含 DTO 和单次抓取用例
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含请求闸门、重试执行器、内容校验和 markdown 清洗
pub mod domain;

/// 引擎模块
///
/// 页面抓取接口及其 HTTP 实现
pub mod engines;

/// 基础设施模块
///
/// 提供指标导出等外部集成
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由、处理器和响应映射
pub mod presentation;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
