// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::application::dto::crawl_response::ErrorResponseDto;
use crate::domain::models::crawl::InputError;

/// API 层错误
///
/// 只覆盖进入闸门之前就能判定的错误，周期内的失败由 response_mapper 处理
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Input(#[from] InputError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Input(_) => StatusCode::BAD_REQUEST,
        };
        (status, Json(ErrorResponseDto::new(self.to_string()))).into_response()
    }
}
