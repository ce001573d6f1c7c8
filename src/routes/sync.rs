//! # 동기화 라우트 핸들러
//!
//! ## 엔드포인트
//! - `POST /api/v1/sync` → 시트에서 저장소로 전체 동기화
//!
//! 호출자 IP별로 레이트 리밋이 걸리며(기본 시간당 3회), 초과하면 429와
//! `Retry-After` 헤더를 돌려줍니다. 동기화 결과는 성공이면 200, 실패면 500과 함께
//! `SyncResult` 본문으로 돌려줍니다.

use super::AppState;
use crate::error::AppError;
use crate::middleware::rate_limit::RateLimitDecision;
use crate::middleware::ClientIp;
use axum::{
    extract::State,
    http::{HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

const RATE_LIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const RATE_LIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

fn rate_limit_headers(decision: &RateLimitDecision) -> [(HeaderName, String); 2] {
    [
        (RATE_LIMIT_LIMIT, decision.limit.to_string()),
        (RATE_LIMIT_REMAINING, decision.remaining.to_string()),
    ]
}

/// `POST /sync`
pub async fn trigger_sync(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
) -> Result<Response, AppError> {
    let decision = state.rate_limiter.check(&format!("sync:{ip}"));
    if decision.limited {
        tracing::warn!(ip = %ip, "Sync rate limit exceeded");
        return Err(AppError::TooManyRequests {
            retry_after_secs: decision.retry_after_secs(),
        });
    }

    tracing::info!(ip = %ip, "Manual sync requested");
    let result = state.sync.sync_client_data().await;
    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    Ok((status, rate_limit_headers(&decision), Json(result)).into_response())
}
