// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;

use crate::application::use_cases::crawl_once_use_case::CrawlOnceUseCase;
use crate::presentation::handlers::crawl_handler;

/// 创建应用路由
///
/// `/crawl4ai_once` 与 `/v1/crawl_once` 行为完全相同
///
/// # 参数
///
/// * `use_case` - 所有抓取请求共享的用例实例
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(use_case: Arc<CrawlOnceUseCase>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let crawl_routes = Router::new()
        .route("/v1/crawl_once", post(crawl_handler::crawl_once))
        // 旧客户端使用的路径
        .route("/crawl4ai_once", post(crawl_handler::crawl_once))
        .layer(Extension(use_case));

    Router::new().merge(public_routes).merge(crawl_routes)
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
