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

use axum::{
    body::Bytes,
    extract::Extension,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{info_span, warn, Instrument};
use uuid::Uuid;

use crate::{
    application::{
        dto::crawl_request::CrawlRequestDto, use_cases::crawl_once_use_case::CrawlOnceUseCase,
    },
    domain::models::crawl::CrawlRequest,
    presentation::{errors::ApiError, response_mapper},
};

/// 单次抓取
///
/// 请求体按 JSON 解析，不要求 `Content-Type`。
/// 缺少 `url` 时直接返回 400，不会进入闸门。
pub async fn crawl_once(
    Extension(use_case): Extension<Arc<CrawlOnceUseCase>>,
    body: Bytes,
) -> Response {
    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejecting crawl request: {}", e);
            return e.into_response();
        }
    };

    let span = info_span!(
        "crawl_once",
        request_id = %Uuid::new_v4(),
        url = request.url()
    );

    async move {
        let outcome = use_case.execute(&request).await;
        response_mapper::into_response(outcome)
    }
    .instrument(span)
    .await
}

fn parse_request(body: &[u8]) -> Result<CrawlRequest, ApiError> {
    let dto = CrawlRequestDto::from_slice(body)?;
    Ok(CrawlRequest::try_from(dto)?)
}
