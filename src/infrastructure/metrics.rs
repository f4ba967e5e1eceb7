// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

use crate::config::settings::MetricsSettings;

/// 安装 Prometheus 导出器
///
/// 未启用时什么也不做，指标宏退化为空操作
pub fn init_metrics(settings: &MetricsSettings) -> anyhow::Result<()> {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return Ok(());
    }

    let addr: SocketAddr = settings.listen_addr.parse()?;

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!(
            "Failed to install Prometheus recorder: {}. This might happen if the port is already in use.",
            e
        );
        return Ok(());
    }

    info!("Metrics exporter listening on {}", addr);
    Ok(())
}
