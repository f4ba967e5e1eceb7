// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 内容校验（content_validator）：判断原始内容是否可用
/// - markdown 清洗（markdown_sanitizer）：固定顺序的清洗管道
/// - 请求闸门（request_gate）：全局串行化抓取周期
/// - 重试执行器（retry_executor）：固定间隔的有限次重试
pub mod content_validator;
pub mod markdown_sanitizer;
pub mod request_gate;
pub mod retry_executor;
