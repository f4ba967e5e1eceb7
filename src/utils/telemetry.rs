// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::settings::LoggingSettings;

/// 初始化日志
///
/// `RUST_LOG` 存在时优先使用，否则使用配置中的过滤指令。
/// 重复调用（例如多个测试）时静默忽略。
pub fn init_telemetry(settings: &LoggingSettings) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.filter));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if settings.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    if let Err(e) = result {
        tracing::debug!("Telemetry already initialized: {}", e);
    }
}
