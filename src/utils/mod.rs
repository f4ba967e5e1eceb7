// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
/// 包括 HTML 转换、重试策略、遥测初始化等功能
pub mod html_to_markdown;
pub mod retry_policy;
pub mod telemetry;
