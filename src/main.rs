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

use crawlonce::application::use_cases::crawl_once_use_case::CrawlOnceUseCase;
use crawlonce::config::settings::Settings;
use crawlonce::domain::services::{
    markdown_sanitizer::MarkdownSanitizer, request_gate::RequestGate,
    retry_executor::RetryExecutor,
};
use crawlonce::engines::reqwest_engine::ReqwestEngine;
use crawlonce::presentation::routes;
use crawlonce::utils::{retry_policy::RetryPolicy, telemetry};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let settings = Settings::new()?;

    // 2. Initialize logging
    telemetry::init_telemetry(&settings.logging);
    info!("Starting crawlonce...");

    // Initialize Prometheus Metrics
    crawlonce::infrastructure::metrics::init_metrics(&settings.metrics)?;

    // 3. Initialize Components
    let fetcher = Arc::new(ReqwestEngine::new(&settings.fetcher)?);
    let sanitizer = Arc::new(MarkdownSanitizer::new(&settings.sanitizer.stop_heading));
    let policy = RetryPolicy::from_settings(&settings.retry);
    info!(
        max_attempts = policy.max_attempts(),
        delay_ms = policy.delay().as_millis() as u64,
        "Retry policy configured"
    );

    let gate = RequestGate::new();
    let executor = RetryExecutor::new(fetcher, sanitizer, policy);
    let use_case = Arc::new(
        CrawlOnceUseCase::new(gate.clone(), executor).with_cycle_timeout(settings.cycle.timeout()),
    );

    // 4. Start HTTP server
    let app = routes::routes(use_case).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(gate))
        .await?;

    info!("Server stopped");
    Ok(())
}

/// 等待 Ctrl-C 或 SIGTERM，随后关闭闸门
async fn shutdown_signal(gate: RequestGate) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, closing request gate");
    gate.close();
}
