// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::dto::crawl_response::{CrawlResponseDto, ErrorResponseDto};
use crate::domain::models::crawl::CrawlOutcome;

/// 将周期结局转换为 HTTP 响应
///
/// | 结局 | 响应 |
/// |---|---|
/// | `Success` | 200 `{"markdown": ...}` |
/// | `NoContent` | 204，无响应体 |
/// | `RetryExhausted` | 500 `{"error": "Crawl failed: ..."}` |
/// | `UnexpectedError` | 500 `{"error": "Crawl failed: ..."}` |
pub fn into_response(outcome: CrawlOutcome) -> Response {
    match outcome {
        CrawlOutcome::Success(document) => {
            (StatusCode::OK, Json(CrawlResponseDto::from(document))).into_response()
        }
        CrawlOutcome::NoContent => StatusCode::NO_CONTENT.into_response(),
        CrawlOutcome::RetryExhausted {
            attempts,
            last_cause,
        } => server_error(format!(
            "Crawl failed: {} (after {} attempts)",
            last_cause, attempts
        )),
        CrawlOutcome::UnexpectedError(cause) => server_error(format!("Crawl failed: {}", cause)),
    }
}

fn server_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponseDto::new(message)),
    )
        .into_response()
}
