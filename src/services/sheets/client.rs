//! # Google Sheets 클라이언트
//!
//! `SheetSource` 트레이트는 "여러 탭의 행들을 문자열 행렬로 가져오기"만 약속합니다.
//! 동기화 서비스는 이 트레이트에만 의존하므로 테스트에서는 가짜 구현으로 바꿔 끼웁니다.
//!
//! 실제 구현은 Sheets API v4 `values:batchGet` 한 번으로 모든 범위를 가져옵니다.
//! ureq는 동기 클라이언트이므로 `spawn_blocking` 안에서 실행합니다.

use super::layout::SheetKind;
use crate::config::Config;
use crate::error::SheetsError;
use serde_json::Value;
use std::future::Future;

/// 탭 하나의 행들 (머리글 제외)
pub type SheetValues = Vec<Vec<String>>;

/// 시트 행의 공급원
pub trait SheetSource: Send + Sync {
    /// 요청한 탭들의 행을 같은 순서로 돌려줍니다. 빈 탭이면 빈 Vec입니다.
    fn fetch_sheets(
        &self,
        sheets: &[SheetKind],
    ) -> impl Future<Output = Result<Vec<SheetValues>, SheetsError>> + Send;
}

#[derive(Clone)]
pub struct GoogleSheetsClient {
    agent: ureq::Agent,
    base_url: String,
    spreadsheet_id: String,
    api_key: Option<String>,
    access_token: Option<String>,
}

impl GoogleSheetsClient {
    pub fn new(config: &Config) -> Self {
        let agent = ureq::Agent::new_with_config(
            ureq::config::Config::builder()
                .timeout_global(Some(config.sheets_timeout))
                .build(),
        );

        Self {
            agent,
            base_url: config.sheets_api_base.trim_end_matches('/').to_string(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            api_key: config.sheets_api_key.clone(),
            access_token: config.sheets_access_token.clone(),
        }
    }

    fn fetch_blocking(&self, sheets: &[SheetKind]) -> Result<Vec<SheetValues>, SheetsError> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values:batchGet",
            self.base_url, self.spreadsheet_id
        );
        let ranges = || {
            sheets
                .iter()
                .map(|sheet| sheet.range())
                .collect::<Vec<_>>()
                .join(", ")
        };

        let mut request = self.agent.get(&url);
        for sheet in sheets {
            request = request.query("ranges", sheet.range());
        }
        request = request
            .query("majorDimension", "ROWS")
            .query("valueRenderOption", "FORMATTED_VALUE");
        if let Some(key) = &self.api_key {
            request = request.query("key", key);
        }
        if let Some(token) = &self.access_token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let mut response = request.call().map_err(|e| SheetsError::Request {
            range: ranges(),
            message: e.to_string(),
        })?;

        let body: Value = response
            .body_mut()
            .read_json()
            .map_err(|e| SheetsError::Decode {
                range: ranges(),
                message: e.to_string(),
            })?;

        rows_from_batch_response(&body, sheets.len()).map_err(|message| SheetsError::Decode {
            range: ranges(),
            message,
        })
    }
}

impl SheetSource for GoogleSheetsClient {
    async fn fetch_sheets(&self, sheets: &[SheetKind]) -> Result<Vec<SheetValues>, SheetsError> {
        let client = self.clone();
        let sheets = sheets.to_vec();

        tokio::task::spawn_blocking(move || client.fetch_blocking(&sheets))
            .await
            .map_err(|e| SheetsError::Task(e.to_string()))?
    }
}

/// `batchGet` 응답을 요청한 범위 순서대로 나눕니다.
///
/// ```json
/// { "valueRanges": [ { "range": "...", "values": [["a", "b"], ["c"]] }, ... ] }
/// ```
///
/// 범위 개수가 요청과 다르면 에러입니다.
fn rows_from_batch_response(body: &Value, expected: usize) -> Result<Vec<SheetValues>, String> {
    let ranges = body
        .get("valueRanges")
        .and_then(Value::as_array)
        .ok_or_else(|| "missing valueRanges".to_string())?;
    if ranges.len() != expected {
        return Err(format!("expected {expected} value ranges, got {}", ranges.len()));
    }

    ranges.iter().map(rows_from_value_range).collect()
}

/// 값이 하나도 없는 탭은 `values` 키 자체가 빠져 있습니다.
fn rows_from_value_range(range: &Value) -> Result<SheetValues, String> {
    let Some(values) = range.get("values") else {
        return Ok(Vec::new());
    };
    let rows = values
        .as_array()
        .ok_or_else(|| "values is not an array".to_string())?;

    rows.iter()
        .map(|row| {
            let cells = row
                .as_array()
                .ok_or_else(|| "row is not an array".to_string())?;
            Ok(cells.iter().map(cell_text).collect())
        })
        .collect()
}

fn cell_text(cell: &Value) -> String {
    match cell {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
