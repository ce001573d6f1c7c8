//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//! 인증은 없습니다. 앞단(리버스 프록시)에서 접근을 통제한다고 가정합니다.
//!
//! 각 하위 모듈:
//! - `clients`: 클라이언트 목록과 상세(요약, 레이더, 지표 비교)
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `sync`: 수동 동기화 트리거 (레이트 리밋 적용)

pub mod clients;
pub mod health;
pub mod sync;

pub use clients::*;
pub use health::*;
pub use sync::*;

use crate::middleware::RateLimiter;
use crate::services::sheets::GoogleSheetsClient;
use crate::services::sync::SyncService;
use sqlx::SqlitePool;
use std::sync::Arc;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// 필드는 전부 내부적으로 Arc이므로 clone은 참조 카운트 증가일 뿐입니다.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub sync: Arc<SyncService<GoogleSheetsClient>>,
    pub rate_limiter: Arc<RateLimiter>,
}
