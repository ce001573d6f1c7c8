//! # 클라이언트 쿼리 모듈
//!
//! `clients` 테이블에 대한 조회/생성/삭제 함수들입니다.
//! 조회 함수는 `SqlitePool`을, 동기화 트랜잭션 안에서 쓰이는 쓰기 함수는
//! `&mut SqliteConnection`을 받습니다. 트랜잭션(`Transaction`)은 역참조로
//! `SqliteConnection`이 되므로 같은 함수를 트랜잭션 안팎에서 쓸 수 있습니다.

use crate::error::AppError;
use crate::models::ClientOverview;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

const CLIENT_COLUMNS: &str = "client_id, client_name, coach_name, status, registration_date, \
     weeks, chat_link, wellbeing_t0_basic, wellbeing_t4_basic";

/// 한 행에 바인딩하는 값 개수
const BINDS_PER_CLIENT: usize = 9;

/// SQLite의 바인딩 변수 한도 (`SQLITE_MAX_VARIABLE_NUMBER`)
pub(crate) const BIND_LIMIT: usize = 32766;

/// 클라이언트 목록을 등록일 최신순으로 조회합니다.
///
/// `coach`가 주어지면 해당 코치의 클라이언트만 돌려줍니다.
pub async fn list_clients(
    pool: &SqlitePool,
    coach: Option<&str>,
) -> Result<Vec<ClientOverview>, AppError> {
    let clients = match coach {
        Some(coach) => {
            sqlx::query_as::<_, ClientOverview>(&format!(
                "SELECT {CLIENT_COLUMNS} FROM clients WHERE coach_name = ? \
                 ORDER BY registration_date DESC, client_id"
            ))
            .bind(coach)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, ClientOverview>(&format!(
                "SELECT {CLIENT_COLUMNS} FROM clients ORDER BY registration_date DESC, client_id"
            ))
            .fetch_all(pool)
            .await?
        }
    };

    Ok(clients)
}

pub async fn get_client(
    pool: &SqlitePool,
    client_id: &str,
) -> Result<Option<ClientOverview>, AppError> {
    let client = sqlx::query_as::<_, ClientOverview>(&format!(
        "SELECT {CLIENT_COLUMNS} FROM clients WHERE client_id = ?"
    ))
    .bind(client_id)
    .fetch_optional(pool)
    .await?;

    Ok(client)
}

/// 여러 클라이언트를 다중 행 INSERT로 저장하고 삽입된 행 수를 돌려줍니다.
///
/// 바인딩 한도를 넘지 않도록 묶음 단위로 나눠 실행합니다.
pub async fn create_clients(
    conn: &mut SqliteConnection,
    clients: &[ClientOverview],
) -> Result<u64, AppError> {
    let mut inserted = 0;

    for chunk in clients.chunks(BIND_LIMIT / BINDS_PER_CLIENT) {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("INSERT INTO clients ({CLIENT_COLUMNS}) "));

        builder.push_values(chunk, |mut row, client| {
            row.push_bind(client.client_id.as_str())
                .push_bind(client.client_name.as_str())
                .push_bind(client.coach_name.as_str())
                .push_bind(client.status.as_str())
                .push_bind(client.registration_date)
                .push_bind(client.weeks)
                .push_bind(client.chat_link.as_str())
                .push_bind(client.wellbeing_t0_basic)
                .push_bind(client.wellbeing_t4_basic);
        });

        let result = builder.build().execute(&mut *conn).await?;
        inserted += result.rows_affected();
    }

    Ok(inserted)
}

/// 모든 클라이언트를 삭제하고 삭제된 행 수를 돌려줍니다.
pub async fn delete_all_clients(conn: &mut SqliteConnection) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM clients").execute(&mut *conn).await?;
    Ok(result.rows_affected())
}
