//! # 스프레드시트 수집
//!
//! 세 탭을 한 번의 요청으로 가져와 구조를 검사하고, 파싱한 뒤 클라이언트 단위로 결합합니다.
//!
//! - `layout`: 탭별 범위와 열 번호
//! - `client`: `SheetSource` 트레이트와 Google Sheets 구현
//! - `parser`: 문자열 행 → 타입 있는 레코드
//! - `combine`: 개요 기준 결합

pub mod client;
pub mod combine;
pub mod layout;
pub mod parser;

pub use client::{GoogleSheetsClient, SheetSource, SheetValues};
pub use combine::{combine_client_data, ClientRecord};
pub use layout::SheetKind;

use crate::error::SheetsError;
use chrono::{DateTime, Utc};
use layout::{check_shape, T0_LAYOUT, T4_LAYOUT};
use parser::{parse_assessment_rows, parse_overview_rows};

/// 수집 순서: 개요, T0, T4
const SHEETS: [SheetKind; 3] = [
    SheetKind::Overview,
    SheetKind::AssessmentT0,
    SheetKind::AssessmentT4,
];

/// 한 번의 수집 결과
#[derive(Debug, Clone, Default)]
pub struct FetchedClients {
    pub records: Vec<ClientRecord>,
    /// 식별자가 없어 건너뛴 행 수 (세 탭 합계)
    pub skipped_rows: usize,
    /// 날짜를 현재 시각으로 대체한 횟수 (세 탭 합계)
    pub date_fallbacks: usize,
}

/// 세 탭을 가져와 결합된 클라이언트 목록을 만듭니다.
///
/// 세 범위는 한 번에 요청하며 어느 하나라도 실패하면 에러를 돌려줍니다.
/// `now`는 읽을 수 없는 날짜의 대체값입니다.
pub async fn fetch_client_data<S: SheetSource>(
    source: &S,
    now: DateTime<Utc>,
) -> Result<FetchedClients, SheetsError> {
    let fetched = source.fetch_sheets(&SHEETS).await?;
    let [overview_rows, t0_rows, t4_rows]: [SheetValues; 3] =
        fetched.try_into().map_err(|sheets: Vec<SheetValues>| SheetsError::Decode {
            range: "batchGet".to_string(),
            message: format!("expected {} sheets, got {}", SHEETS.len(), sheets.len()),
        })?;

    tracing::info!(
        overview = overview_rows.len(),
        t0 = t0_rows.len(),
        t4 = t4_rows.len(),
        "Fetched sheet rows"
    );

    check_shape(SheetKind::Overview, &overview_rows)?;
    check_shape(SheetKind::AssessmentT0, &t0_rows)?;
    check_shape(SheetKind::AssessmentT4, &t4_rows)?;

    let overview = parse_overview_rows(&overview_rows, now);
    let t0 = parse_assessment_rows(&t0_rows, &T0_LAYOUT, now);
    let t4 = parse_assessment_rows(&t4_rows, &T4_LAYOUT, now);
    if overview.records.is_empty() {
        tracing::warn!(range = SheetKind::Overview.range(), "Overview sheet has no client rows");
    }

    tracing::info!(
        clients = overview.records.len(),
        t0 = t0.records.len(),
        t4 = t4.records.len(),
        "Parsed sheet records"
    );

    let skipped_rows = overview.skipped_rows + t0.skipped_rows + t4.skipped_rows;
    let date_fallbacks = overview.date_fallbacks + t0.date_fallbacks + t4.date_fallbacks;
    if date_fallbacks > 0 {
        tracing::warn!(date_fallbacks, "Some dates could not be parsed and were replaced");
    }

    Ok(FetchedClients {
        records: combine_client_data(overview.records, t0.records, t4.records),
        skipped_rows,
        date_fallbacks,
    })
}
