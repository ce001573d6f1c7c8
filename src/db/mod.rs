//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)와 동기화 서비스(services/sync)에서 호출합니다.
//!
//! 각 하위 모듈:
//! - `clients`: 클라이언트 개요 조회/생성/삭제
//! - `assessments`: T0/T4 평가 조회/생성/삭제
//! - `sync`: 삭제+삽입을 한 트랜잭션으로 묶는 전체 교체

pub mod assessments;
pub mod clients;
pub mod sync;

pub use assessments::*;
pub use clients::*;
pub use sync::*;

#[cfg(test)]
pub(crate) mod testing {
    //! 테스트용 인메모리 DB와 레코드 생성기

    use crate::models::{Assessment, ClientOverview, Timepoint};
    use chrono::{TimeZone, Utc};
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    /// 마이그레이션이 적용된 인메모리 SQLite 풀
    ///
    /// 인메모리 DB는 연결마다 따로 생기므로 연결을 하나로 고정하고 닫히지 않게 합니다.
    pub async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    pub fn overview(client_id: &str, coach: &str) -> ClientOverview {
        ClientOverview {
            client_id: client_id.to_string(),
            client_name: format!("Klient {client_id}"),
            coach_name: coach.to_string(),
            status: "Aktiv".to_string(),
            registration_date: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            weeks: 3.5,
            chat_link: format!("https://chat.example/{client_id}"),
            wellbeing_t0_basic: Some(4),
            wellbeing_t4_basic: None,
        }
    }

    pub fn assessment(client_id: &str, timepoint: Timepoint) -> Assessment {
        let mut assessment = Assessment {
            client_id: client_id.to_string(),
            timepoint,
            submitted_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
            wellbeing: Some(5),
            burdens: Default::default(),
            work_area: Some(6),
            private_area: None,
            self_care: Default::default(),
            coaching: Default::default(),
        };
        assessment.burdens.stress = Some("Mittel".to_string());
        assessment.self_care.exercise = Some("Selten".to_string());
        assessment
    }
}
