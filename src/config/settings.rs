// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::services::markdown_sanitizer::DEFAULT_STOP_HEADING;

/// 应用程序配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 重试配置
    pub retry: RetrySettings,
    /// 抓取引擎配置
    pub fetcher: FetcherSettings,
    /// 清洗配置
    pub sanitizer: SanitizerSettings,
    /// 周期配置
    #[serde(default)]
    pub cycle: CycleSettings,
    /// 日志配置
    pub logging: LoggingSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 重试配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RetrySettings {
    /// 最大尝试次数（包含第一次）
    pub max_attempts: u32,
    /// 重试间隔（毫秒）
    pub delay_ms: u64,
}

/// 抓取引擎配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherSettings {
    /// 单次请求超时时间（秒）
    pub timeout_secs: u64,
    /// User-Agent
    pub user_agent: String,
    /// 最大重定向次数
    pub max_redirects: usize,
}

impl FetcherSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 清洗配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SanitizerSettings {
    /// 截断标题文本
    pub stop_heading: String,
}

/// 周期配置设置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CycleSettings {
    /// 周期时限（秒），未设置表示不限制
    pub timeout_secs: Option<u64>,
}

impl CycleSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// 日志配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// EnvFilter 指令，RUST_LOG 优先
    pub filter: String,
    /// 是否输出 JSON 格式
    pub json: bool,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出器监听地址
    pub listen_addr: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和
    /// `CRAWLONCE__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("CRAWLONCE").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 只包含默认值的配置
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            // Server
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            // Retry
            .set_default("retry.max_attempts", 3)?
            .set_default("retry.delay_ms", 2000)?
            // Fetcher
            .set_default("fetcher.timeout_secs", 30)?
            .set_default(
                "fetcher.user_agent",
                "Mozilla/5.0 (compatible; crawlonce/1.0)",
            )?
            .set_default("fetcher.max_redirects", 10)?
            // Sanitizer
            .set_default("sanitizer.stop_heading", DEFAULT_STOP_HEADING)?
            // Logging
            .set_default("logging.filter", "info,crawlonce=debug")?
            .set_default("logging.json", false)?
            // Metrics
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
