//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `GOOGLE_SHEETS_SPREADSHEET_ID`: 원본 스프레드시트 ID (필수)
//! - `GOOGLE_SHEETS_API_KEY` / `GOOGLE_SHEETS_ACCESS_TOKEN`: Sheets API 인증 (선택)
//! - `SHEETS_API_BASE`, `SHEETS_TIMEOUT_SECS`: Sheets API 주소와 전송 타임아웃
//! - `SYNC_RATE_LIMIT`, `SYNC_RATE_WINDOW_SECS`: 수동 동기화 허용 횟수/기간
//! - `SYNC_INTERVAL_SECS`: 정기 동기화 주기 (없으면 비활성)
//! - `HOST`, `PORT`: 서버 바인딩 주소
//! - `FRONTEND_DIST`: 빌드된 프론트엔드 디렉터리 (기본값: "frontend/dist")

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후 애플리케이션 전체에서 공유됩니다.
#[derive(Clone)]
pub struct Config {
    /// SQLite 데이터베이스 경로 (예: "sqlite:data/coachboard.db")
    pub database_url: String,
    pub spreadsheet_id: String,
    pub sheets_api_key: Option<String>,
    pub sheets_access_token: Option<String>,
    /// 기본값: "https://sheets.googleapis.com"
    pub sheets_api_base: String,
    pub sheets_timeout: Duration,
    /// 기간당 허용되는 수동 동기화 횟수 (기본값: 3)
    pub sync_rate_limit: u32,
    /// 기본값: 1시간
    pub sync_rate_window: Duration,
    /// None이면 정기 동기화를 하지 않습니다.
    pub sync_interval: Option<Duration>,
    pub host: String,
    pub port: u16,
    pub frontend_dist: PathBuf,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`과 `GOOGLE_SHEETS_SPREADSHEET_ID`는 필수이며, 없으면 에러가 발생합니다.
    /// 나머지 설정은 기본값이 있어 환경변수가 없어도 동작합니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            spreadsheet_id: env::var("GOOGLE_SHEETS_SPREADSHEET_ID")?,
            sheets_api_key: optional_var("GOOGLE_SHEETS_API_KEY"),
            sheets_access_token: optional_var("GOOGLE_SHEETS_ACCESS_TOKEN"),
            sheets_api_base: env::var("SHEETS_API_BASE")
                .unwrap_or_else(|_| "https://sheets.googleapis.com".to_string()),
            sheets_timeout: Duration::from_secs(parsed_var("SHEETS_TIMEOUT_SECS", 30)),
            sync_rate_limit: parsed_var("SYNC_RATE_LIMIT", 3),
            sync_rate_window: Duration::from_secs(parsed_var("SYNC_RATE_WINDOW_SECS", 3600)),
            // 0이나 잘못된 값은 "비활성"으로 취급합니다.
            sync_interval: optional_var("SYNC_INTERVAL_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parsed_var("PORT", 3000),
            frontend_dist: frontend_dist(optional_var("FRONTEND_DIST")),
        })
    }
}

#[cfg(test)]
impl Config {
    /// 외부 자원을 가리키지 않는 테스트용 설정
    pub(crate) fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            spreadsheet_id: "sheet".into(),
            sheets_api_key: None,
            sheets_access_token: None,
            // 닫힌 로컬 포트: 요청은 즉시 거부됩니다.
            sheets_api_base: "http://127.0.0.1:9".into(),
            sheets_timeout: Duration::from_secs(2),
            sync_rate_limit: 3,
            sync_rate_window: Duration::from_secs(3600),
            sync_interval: None,
            host: "127.0.0.1".into(),
            port: 3000,
            frontend_dist: PathBuf::from("frontend/dist"),
        }
    }
}

// 비밀값(API 키, 토큰)이 로그에 찍히지 않도록 Debug를 직접 구현합니다.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("sheets_api_key", &self.sheets_api_key.as_ref().map(|_| "***"))
            .field("sheets_access_token", &self.sheets_access_token.as_ref().map(|_| "***"))
            .field("sheets_api_base", &self.sheets_api_base)
            .field("sheets_timeout", &self.sheets_timeout)
            .field("sync_rate_limit", &self.sync_rate_limit)
            .field("sync_rate_window", &self.sync_rate_window)
            .field("sync_interval", &self.sync_interval)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("frontend_dist", &self.frontend_dist)
            .finish()
    }
}

/// 비어 있지 않은 환경변수만 Some으로 돌려줍니다.
fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// 프론트엔드 빌드 경로. 기본값은 작업 디렉터리 기준 "frontend/dist"입니다.
fn frontend_dist(value: Option<String>) -> PathBuf {
    value.map_or_else(|| PathBuf::from("frontend/dist"), PathBuf::from)
}

/// 환경변수를 파싱하고, 없거나 파싱에 실패하면 기본값을 사용합니다.
fn parsed_var<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
