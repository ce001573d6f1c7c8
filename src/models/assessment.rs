//! # 평가(Assessment) 모델 정의
//!
//! T0(기준 시점)과 T4(4주 후) 체크업 설문 한 건에 대응하는 구조체들입니다.
//!
//! ## 필드 그룹
//! - 웰빙 점수 (0–10)
//! - `Burdens`: 심리적 부담 10개 (Gering/Mittel/Stark, 낮을수록 좋음)
//! - 생활 영역 2개 (0–10)
//! - `SelfCare`: 자기 돌봄 습관 8개 (Selten/Mittel/Oft, 높을수록 좋음)
//! - `CoachingEvaluation`: 코칭 평가 7개: **T4에만 존재**
//!
//! 그룹 구조체는 `#[sqlx(flatten)]`/`#[serde(flatten)]`으로 펼쳐지므로
//! DB 테이블과 JSON 응답에서는 평평한 컬럼/키로 보입니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 평가 시점 구분자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
pub enum Timepoint {
    #[sqlx(rename = "T0")]
    T0,
    #[sqlx(rename = "T4")]
    T4,
}

impl Timepoint {
    pub fn as_str(self) -> &'static str {
        match self {
            Timepoint::T0 => "T0",
            Timepoint::T4 => "T4",
        }
    }
}

impl fmt::Display for Timepoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 심리적 부담 평가 (각 값: "Gering" / "Mittel" / "Stark" 또는 없음)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Burdens {
    pub stress: Option<String>,
    pub exhaustion: Option<String>,
    pub anxiety: Option<String>,
    pub depression: Option<String>,
    pub self_doubt: Option<String>,
    pub sleep_problems: Option<String>,
    pub tension: Option<String>,
    pub irritability: Option<String>,
    pub social_withdrawal: Option<String>,
    pub other: Option<String>,
}

impl Burdens {
    /// 시트 열 순서대로 10개 값을 돌려줍니다.
    pub fn values(&self) -> [Option<&str>; 10] {
        [
            self.stress.as_deref(),
            self.exhaustion.as_deref(),
            self.anxiety.as_deref(),
            self.depression.as_deref(),
            self.self_doubt.as_deref(),
            self.sleep_problems.as_deref(),
            self.tension.as_deref(),
            self.irritability.as_deref(),
            self.social_withdrawal.as_deref(),
            self.other.as_deref(),
        ]
    }
}

/// 자기 돌봄 빈도 (각 값: "Selten" / "Mittel" / "Oft" 또는 없음)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SelfCare {
    pub adequate_sleep: Option<String>,
    pub healthy_eating: Option<String>,
    pub sufficient_rest: Option<String>,
    pub exercise: Option<String>,
    pub set_boundaries: Option<String>,
    pub time_for_beauty: Option<String>,
    pub share_emotions: Option<String>,
    pub live_values: Option<String>,
}

impl SelfCare {
    pub fn values(&self) -> [Option<&str>; 8] {
        [
            self.adequate_sleep.as_deref(),
            self.healthy_eating.as_deref(),
            self.sufficient_rest.as_deref(),
            self.exercise.as_deref(),
            self.set_boundaries.as_deref(),
            self.time_for_beauty.as_deref(),
            self.share_emotions.as_deref(),
            self.live_values.as_deref(),
        ]
    }
}

/// 코칭 관계 평가: T4 설문에만 있는 항목입니다.
///
/// T0 평가에서는 항상 `Default`(모든 필드 `None`)입니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CoachingEvaluation {
    pub trust: Option<String>,
    pub genuine_interest: Option<String>,
    pub mutual_understanding: Option<String>,
    pub goal_alignment: Option<String>,
    /// 0–10 점수
    pub learning_experience: Option<i64>,
    pub progress_achievement: Option<i64>,
    pub general_satisfaction: Option<i64>,
}

impl CoachingEvaluation {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// 평가 한 건: DB의 `assessments` 테이블 한 행에 대응합니다.
///
/// `client_id`는 외래키로 강제되지 않습니다 (개요에 없는 평가도 허용).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Assessment {
    pub client_id: String,
    pub timepoint: Timepoint,
    pub submitted_at: DateTime<Utc>,
    /// 핵심 웰빙 점수 (0–10)
    pub wellbeing: Option<i64>,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub burdens: Burdens,
    /// 생활 영역 만족도 (0–10)
    pub work_area: Option<i64>,
    pub private_area: Option<i64>,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub self_care: SelfCare,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub coaching: CoachingEvaluation,
}
