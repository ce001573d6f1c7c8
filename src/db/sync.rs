//! # 전체 교체 트랜잭션
//!
//! 동기화는 저장소를 시트의 스냅샷으로 통째로 바꿉니다.
//! 삭제와 삽입은 하나의 트랜잭션 안에서 실행되며, 중간에 실패하면
//! 트랜잭션이 커밋 없이 버려지므로(drop 시 롤백) 이전 데이터가 그대로 남습니다.

use super::assessments::{create_assessments, delete_all_assessments};
use super::clients::{create_clients, delete_all_clients};
use crate::error::AppError;
use crate::models::{Assessment, ClientOverview};
use sqlx::SqlitePool;
use std::time::Instant;

/// 교체 결과 (삽입된 행 수와 단계별 소요 시간)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceCounts {
    pub clients_created: u64,
    pub assessments_created: u64,
    pub delete_ms: u64,
    pub insert_ms: u64,
}

/// 기존 클라이언트/평가를 모두 지우고 새 데이터로 채웁니다.
///
/// 순서: 평가 삭제 → 클라이언트 삭제 → 클라이언트 삽입 → 평가 삽입 → 커밋
pub async fn replace_all_client_data(
    pool: &SqlitePool,
    clients: &[ClientOverview],
    assessments: &[Assessment],
) -> Result<ReplaceCounts, AppError> {
    let mut tx = pool.begin().await?;

    let delete_start = Instant::now();
    let assessments_deleted = delete_all_assessments(&mut tx).await?;
    let clients_deleted = delete_all_clients(&mut tx).await?;
    let delete_ms = delete_start.elapsed().as_millis() as u64;
    tracing::info!(
        clients = clients_deleted,
        assessments = assessments_deleted,
        "Cleared existing data in {}ms",
        delete_ms
    );

    let insert_start = Instant::now();
    let clients_created = create_clients(&mut tx, clients).await?;
    let assessments_created = create_assessments(&mut tx, assessments).await?;
    let insert_ms = insert_start.elapsed().as_millis() as u64;

    tx.commit().await?;
    tracing::info!(
        clients = clients_created,
        assessments = assessments_created,
        "Inserted new data in {}ms",
        insert_ms
    );

    Ok(ReplaceCounts {
        clients_created,
        assessments_created,
        delete_ms,
        insert_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::{assessment, count_rows, overview, test_pool};
    use crate::db::{get_assessment, get_client};
    use crate::models::Timepoint;

    #[tokio::test]
    async fn replaces_previous_snapshot() {
        let pool = test_pool().await;
        replace_all_client_data(
            &pool,
            &[overview("old", "CoachA")],
            &[assessment("old", Timepoint::T0)],
        )
        .await
        .unwrap();

        let counts = replace_all_client_data(
            &pool,
            &[overview("new1", "CoachA"), overview("new2", "CoachB")],
            &[assessment("new1", Timepoint::T0), assessment("new1", Timepoint::T4)],
        )
        .await
        .unwrap();

        assert_eq!(counts.clients_created, 2);
        assert_eq!(counts.assessments_created, 2);
        assert_eq!(count_rows(&pool, "clients").await, 2);
        assert_eq!(count_rows(&pool, "assessments").await, 2);
        assert!(get_client(&pool, "old").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn failed_insert_rolls_back_deletes() {
        let pool = test_pool().await;
        replace_all_client_data(
            &pool,
            &[overview("keep", "CoachA")],
            &[assessment("keep", Timepoint::T0)],
        )
        .await
        .unwrap();

        sqlx::query(
            "CREATE TRIGGER fail_assessment_insert BEFORE INSERT ON assessments \
             BEGIN SELECT RAISE(ABORT, 'assessment insert rejected'); END;",
        )
        .execute(&pool)
        .await
        .unwrap();

        let result = replace_all_client_data(
            &pool,
            &[overview("new", "CoachA")],
            &[assessment("new", Timepoint::T0)],
        )
        .await;
        assert!(result.is_err());

        assert!(get_client(&pool, "keep").await.unwrap().is_some());
        assert!(get_client(&pool, "new").await.unwrap().is_none());
        assert!(get_assessment(&pool, "keep", Timepoint::T0).await.unwrap().is_some());
    }
}
