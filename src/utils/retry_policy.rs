// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;

use crate::config::settings::RetrySettings;

/// 重试策略配置
///
/// 固定间隔：每次重试之前等待相同的时间，最后一次尝试之后不再等待
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 最大尝试次数（包含第一次），至少为 1
    max_attempts: u32,
    /// 两次尝试之间的等待时间
    delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// 创建重试策略
    ///
    /// `max_attempts` 为 0 时按 1 处理
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// 从配置创建
    pub fn from_settings(settings: &RetrySettings) -> Self {
        Self::fixed(
            settings.max_attempts,
            Duration::from_millis(settings.delay_ms),
        )
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// 第 `attempt` 次尝试（从 1 开始）失败后是否还能重试
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}
