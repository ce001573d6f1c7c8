//! # 클라이언트 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/v1/clients?coach=...` → 클라이언트 목록 (코치 필터 선택)
//! - `GET /api/v1/clients/{client_id}` → 개요 + T0/T4 평가 + 요약 + 레이더 + 지표 비교

use super::AppState;
use crate::{
    db,
    error::AppError,
    models::*,
    services::{
        comparison::{compare_assessments, MetricComparison},
        radar::prepare_radar_chart_data,
        summary::summarize_assessments,
    },
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

/// 상세 화면에 필요한 모든 것
#[derive(Debug, Serialize)]
pub struct ClientDetail {
    pub client: ClientOverview,
    pub assessment_t0: Option<Assessment>,
    pub assessment_t4: Option<Assessment>,
    pub summary: AssessmentSummary,
    pub radar: RadarChartData,
    pub metrics: Vec<MetricComparison>,
}

impl ClientDetail {
    /// 시점별 평가로 요약, 레이더, 지표 비교를 계산합니다.
    fn build(
        client: ClientOverview,
        assessment_t0: Option<Assessment>,
        assessment_t4: Option<Assessment>,
    ) -> Self {
        let (t0, t4) = (assessment_t0.as_ref(), assessment_t4.as_ref());
        Self {
            summary: summarize_assessments(t0, t4),
            radar: prepare_radar_chart_data(t0, t4),
            metrics: compare_assessments(t0, t4),
            client,
            assessment_t0,
            assessment_t4,
        }
    }
}

/// `GET /clients`: `{ "clients": [...] }`
pub async fn list_clients(
    State(state): State<AppState>,
    Query(query): Query<ClientListQuery>,
) -> Result<Json<Value>, AppError> {
    let coach = query.coach.as_deref().map(str::trim).filter(|c| !c.is_empty());
    let clients = db::list_clients(&state.pool, coach).await?;
    Ok(Json(json!({ "clients": clients })))
}

/// `GET /clients/{client_id}`: 없는 클라이언트면 404
pub async fn get_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<ClientDetail>, AppError> {
    let client = db::get_client(&state.pool, &client_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let assessment_t0 = db::get_assessment(&state.pool, &client_id, Timepoint::T0).await?;
    let assessment_t4 = db::get_assessment(&state.pool, &client_id, Timepoint::T4).await?;

    Ok(Json(ClientDetail::build(client, assessment_t0, assessment_t4)))
}
