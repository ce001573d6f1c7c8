//! # 동기화 결과 모델
//!
//! 동기화 오케스트레이터가 호출자에게 돌려주는 구조화된 결과입니다.
//! 동기화는 절대 에러를 밖으로 던지지 않고, 실패도 `SyncResult`로 표현합니다.

use serde::Serialize;
use std::fmt;

/// 동기화 상태 머신의 단계
///
/// ```text
/// Fetching → Transforming → Replacing → Done
///     └──────────┴─────────────┴──→ Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncPhase {
    Fetching,
    Transforming,
    Replacing,
    Done,
    Failed,
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncPhase::Fetching => "FETCHING",
            SyncPhase::Transforming => "TRANSFORMING",
            SyncPhase::Replacing => "REPLACING",
            SyncPhase::Done => "DONE",
            SyncPhase::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

/// 동기화 한 번의 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncResult {
    pub success: bool,
    pub clients_created: u64,
    pub assessments_created: u64,
    pub total_clients: usize,
    /// 전체 소요 시간 (밀리초)
    pub duration_ms: u64,
    /// 파싱할 수 없는 날짜를 현재 시각으로 대체한 횟수
    pub date_fallbacks: usize,
    /// 실패한 단계 (성공 시 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_phase: Option<SyncPhase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SyncResult {
    pub fn failed(phase: SyncPhase, error: String, duration_ms: u64) -> Self {
        Self {
            success: false,
            clients_created: 0,
            assessments_created: 0,
            total_clients: 0,
            duration_ms,
            date_fallbacks: 0,
            failed_phase: Some(phase),
            error: Some(error),
        }
    }
}
