//! # 평가 쿼리 모듈
//!
//! `assessments` 테이블은 외래키 없이 `client_id`로만 클라이언트와 연결됩니다.
//! 평가 행의 기본키는 저장 시점에 만드는 UUIDv7이며 도메인 모델에는 드러나지 않습니다.

use super::clients::BIND_LIMIT;
use crate::error::AppError;
use crate::models::{Assessment, Timepoint};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

const ASSESSMENT_COLUMNS: &str = "client_id, timepoint, submitted_at, wellbeing, \
     stress, exhaustion, anxiety, depression, self_doubt, sleep_problems, tension, \
     irritability, social_withdrawal, other, work_area, private_area, \
     adequate_sleep, healthy_eating, sufficient_rest, exercise, set_boundaries, \
     time_for_beauty, share_emotions, live_values, trust, genuine_interest, \
     mutual_understanding, goal_alignment, learning_experience, progress_achievement, \
     general_satisfaction";

/// `id` + 위의 31개 컬럼
const BINDS_PER_ASSESSMENT: usize = 32;

/// 클라이언트의 특정 시점 평가 하나를 조회합니다. 여러 개면 가장 늦게 제출된 것입니다.
pub async fn get_assessment(
    pool: &SqlitePool,
    client_id: &str,
    timepoint: Timepoint,
) -> Result<Option<Assessment>, AppError> {
    let assessment = sqlx::query_as::<_, Assessment>(&format!(
        "SELECT {ASSESSMENT_COLUMNS} FROM assessments WHERE client_id = ? AND timepoint = ? \
         ORDER BY submitted_at DESC LIMIT 1"
    ))
    .bind(client_id)
    .bind(timepoint)
    .fetch_optional(pool)
    .await?;

    Ok(assessment)
}

/// 여러 평가를 다중 행 INSERT로 저장하고 삽입된 행 수를 돌려줍니다.
pub async fn create_assessments(
    conn: &mut SqliteConnection,
    assessments: &[Assessment],
) -> Result<u64, AppError> {
    let mut inserted = 0;

    for chunk in assessments.chunks(BIND_LIMIT / BINDS_PER_ASSESSMENT) {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("INSERT INTO assessments (id, {ASSESSMENT_COLUMNS}) "));

        builder.push_values(chunk, |mut row, a| {
            let b = &a.burdens;
            let s = &a.self_care;
            let c = &a.coaching;

            row.push_bind(uuid::Uuid::now_v7().to_string())
                .push_bind(a.client_id.as_str())
                .push_bind(a.timepoint)
                .push_bind(a.submitted_at)
                .push_bind(a.wellbeing)
                .push_bind(b.stress.as_deref())
                .push_bind(b.exhaustion.as_deref())
                .push_bind(b.anxiety.as_deref())
                .push_bind(b.depression.as_deref())
                .push_bind(b.self_doubt.as_deref())
                .push_bind(b.sleep_problems.as_deref())
                .push_bind(b.tension.as_deref())
                .push_bind(b.irritability.as_deref())
                .push_bind(b.social_withdrawal.as_deref())
                .push_bind(b.other.as_deref())
                .push_bind(a.work_area)
                .push_bind(a.private_area)
                .push_bind(s.adequate_sleep.as_deref())
                .push_bind(s.healthy_eating.as_deref())
                .push_bind(s.sufficient_rest.as_deref())
                .push_bind(s.exercise.as_deref())
                .push_bind(s.set_boundaries.as_deref())
                .push_bind(s.time_for_beauty.as_deref())
                .push_bind(s.share_emotions.as_deref())
                .push_bind(s.live_values.as_deref())
                .push_bind(c.trust.as_deref())
                .push_bind(c.genuine_interest.as_deref())
                .push_bind(c.mutual_understanding.as_deref())
                .push_bind(c.goal_alignment.as_deref())
                .push_bind(c.learning_experience)
                .push_bind(c.progress_achievement)
                .push_bind(c.general_satisfaction);
        });

        let result = builder.build().execute(&mut *conn).await?;
        inserted += result.rows_affected();
    }

    Ok(inserted)
}

pub async fn delete_all_assessments(conn: &mut SqliteConnection) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM assessments")
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}
