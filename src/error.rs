//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 에러 타입을 정의합니다.
//!
//! - `SheetsError`: Google Sheets 가져오기 단계의 에러 (네트워크, 응답 해석, 시트 구조)
//! - `AppError`: HTTP 핸들러의 에러를 하나로 통합하고, HTTP 응답으로 자동 변환
//!
//! 동기화 실패는 `AppError`가 아니라 `SyncResult`로 표현됩니다.
//!
//! 셀 단위의 잘못된 값(날짜, 숫자, `#N/A`)은 에러가 아닙니다.
//! 파서가 `None`/기본값으로 흡수하고 경고 로그만 남깁니다.

use axum::{
    http::{header::RETRY_AFTER, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 스프레드시트 원본에서 행을 가져오는 동안 발생하는 에러
#[derive(Debug, Error)]
pub enum SheetsError {
    /// 연결 실패, 타임아웃, 2xx가 아닌 응답 등
    #[error("Sheets request failed for {range}: {message}")]
    Request { range: String, message: String },

    /// 응답 JSON을 해석할 수 없음
    #[error("Sheets response for {range} could not be decoded: {message}")]
    Decode { range: String, message: String },

    /// 시트 구조가 예상한 열 배치와 다름 (범위 설정 오류)
    #[error("{sheet} row {row} has {width} columns, layout allows at most {expected}")]
    Layout {
        sheet: &'static str,
        row: usize,
        width: usize,
        expected: usize,
    },

    /// 블로킹 작업 스레드가 비정상 종료됨
    #[error("Sheets fetch task failed: {0}")]
    Task(String),
}

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면
/// Axum이 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// 데이터베이스 오류 (HTTP 500)
    /// `#[from]` 덕분에 sqlx 함수 뒤의 `?`가 자동으로 변환합니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 레이트 리밋 초과 (HTTP 429)
    #[error("Too many requests, retry in {retry_after_secs}s")]
    TooManyRequests { retry_after_secs: u64 },
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database)는 실제 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
            AppError::TooManyRequests { retry_after_secs } => {
                let body = Json(json!({
                    "error": {
                        "code": "too_many_requests",
                        "message": "Zu viele Anfragen. Bitte versuche es später erneut."
                    }
                }));
                // 429 응답에는 Retry-After 헤더를 함께 보냅니다.
                return (
                    StatusCode::TOO_MANY_REQUESTS,
                    [(RETRY_AFTER, retry_after_secs.to_string())],
                    body,
                )
                    .into_response();
            }
        };

        // 결과: { "error": { "code": "not_found", "message": "Resource not found" } }
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
