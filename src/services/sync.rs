//! # 동기화 오케스트레이터
//!
//! 시트 → 변환 → 저장소 교체를 한 번에 실행하는 상태 머신입니다.
//!
//! ```text
//! FETCHING ──→ TRANSFORMING ──→ REPLACING ──→ DONE
//!     │              │              │
//!     └──────────────┴──────────────┴──→ FAILED
//! ```
//!
//! 어느 단계에서 실패하든 저장소는 동기화 이전 상태 그대로이며,
//! 호출자에게는 항상 `SyncResult`가 돌아갑니다.

use super::sheets::{fetch_client_data, ClientRecord, SheetSource};
use crate::db;
use crate::models::{Assessment, ClientOverview, SyncPhase, SyncResult};
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// 저장소에 넣을 형태로 펼친 레코드들
#[derive(Debug, Default)]
struct SyncBatch {
    clients: Vec<ClientOverview>,
    assessments: Vec<Assessment>,
}

impl SyncBatch {
    fn from_records(records: Vec<ClientRecord>) -> Self {
        let mut batch = SyncBatch {
            clients: Vec::with_capacity(records.len()),
            assessments: Vec::with_capacity(records.len() * 2),
        };

        for record in records {
            batch.clients.push(record.overview);
            batch.assessments.extend(record.assessment_t0);
            batch.assessments.extend(record.assessment_t4);
        }
        batch
    }
}

pub struct SyncService<S> {
    source: S,
    pool: SqlitePool,
}

impl<S: SheetSource> SyncService<S> {
    pub fn new(source: S, pool: SqlitePool) -> Self {
        Self { source, pool }
    }

    /// 전체 동기화를 실행합니다. 실패도 `SyncResult`로 돌려줍니다.
    pub async fn sync_client_data(&self) -> SyncResult {
        let start = Instant::now();
        let elapsed_ms = || start.elapsed().as_millis() as u64;

        tracing::info!(phase = %SyncPhase::Fetching, "Starting sync");
        let fetched = match fetch_client_data(&self.source, Utc::now()).await {
            Ok(fetched) => fetched,
            Err(e) => return fail(SyncPhase::Fetching, e.to_string(), elapsed_ms()),
        };
        let fetch_ms = elapsed_ms();
        tracing::info!(
            clients = fetched.records.len(),
            skipped_rows = fetched.skipped_rows,
            "Fetched sheet data in {}ms",
            fetch_ms
        );

        let total_clients = fetched.records.len();
        let date_fallbacks = fetched.date_fallbacks;

        // 빈 시트는 설정 오류일 가능성이 높으므로 저장소를 비우지 않습니다.
        if total_clients == 0 {
            tracing::warn!("Sheet returned no clients, keeping existing data");
            return SyncResult {
                success: true,
                clients_created: 0,
                assessments_created: 0,
                total_clients: 0,
                duration_ms: elapsed_ms(),
                date_fallbacks,
                failed_phase: None,
                error: None,
            };
        }

        tracing::info!(phase = %SyncPhase::Transforming, "Preparing batch");
        let batch = SyncBatch::from_records(fetched.records);
        tracing::info!(
            clients = batch.clients.len(),
            assessments = batch.assessments.len(),
            "Prepared batch"
        );

        tracing::info!(phase = %SyncPhase::Replacing, "Replacing stored data");
        let counts =
            match db::replace_all_client_data(&self.pool, &batch.clients, &batch.assessments).await
            {
                Ok(counts) => counts,
                Err(e) => return fail(SyncPhase::Replacing, e.to_string(), elapsed_ms()),
            };

        let duration_ms = elapsed_ms();
        tracing::info!(
            phase = %SyncPhase::Done,
            fetch_ms,
            delete_ms = counts.delete_ms,
            insert_ms = counts.insert_ms,
            "Sync completed in {}ms",
            duration_ms
        );

        SyncResult {
            success: true,
            clients_created: counts.clients_created,
            assessments_created: counts.assessments_created,
            total_clients,
            duration_ms,
            date_fallbacks,
            failed_phase: None,
            error: None,
        }
    }
}

fn fail(phase: SyncPhase, error: String, duration_ms: u64) -> SyncResult {
    tracing::error!(
        phase = %SyncPhase::Failed,
        failed_phase = %phase,
        "Sync failed after {}ms: {}",
        duration_ms,
        error
    );
    SyncResult::failed(phase, error, duration_ms)
}

/// 주기적으로 동기화를 실행하는 백그라운드 작업을 띄웁니다.
///
/// 첫 실행은 시작 후 한 주기가 지난 뒤이며, `cancel`이 취소되면 멈춥니다.
pub fn spawn_scheduled_sync<S>(
    service: Arc<SyncService<S>>,
    every: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    S: SheetSource + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + every, every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Scheduled sync stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let result = service.sync_client_data().await;
                    if result.success {
                        tracing::info!(
                            clients = result.clients_created,
                            assessments = result.assessments_created,
                            "Scheduled sync finished"
                        );
                    } else {
                        tracing::error!(
                            error = result.error.as_deref().unwrap_or_default(),
                            "Scheduled sync failed"
                        );
                    }
                }
            }
        }
    })
}
