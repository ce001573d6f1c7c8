//! # 클라이언트 모델 정의
//!
//! 시트의 "Auswertung"(개요) 탭 한 행에 대응하는 클라이언트 개요 레코드입니다.
//! 동기화 때마다 `clients` 테이블 전체가 이 레코드들로 교체됩니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 클라이언트 개요: DB의 `clients` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ClientOverview {
    /// 시트의 클라이언트 식별자 (기본키)
    pub client_id: String,
    /// 화면 표시용 이름 ("Klient <ID 앞 8자>")
    pub client_name: String,
    pub coach_name: String,
    /// 자유 텍스트 상태값 (예: "Aktiv", "Beendet", "Unbekannt")
    pub status: String,
    pub registration_date: DateTime<Utc>,
    /// 프로그램 경과 주 수 (0 이상)
    pub weeks: f64,
    pub chat_link: String,
    /// 개요 탭의 기본 웰빙 스냅샷 (0–10)
    pub wellbeing_t0_basic: Option<i64>,
    pub wellbeing_t4_basic: Option<i64>,
}

/// 클라이언트 목록 조회 쿼리: `GET /api/v1/clients?coach=...`
#[derive(Debug, Deserialize)]
pub struct ClientListQuery {
    /// 코치 이름으로 필터링 (선택)
    pub coach: Option<String>,
}
