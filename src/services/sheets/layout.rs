//! # 시트 열 배치
//!
//! 세 탭은 서로 다른 고정 열 배치를 가집니다. 위치 번호를 코드 곳곳에 흩뿌리지 않도록
//! 탭마다 이름 붙은 상수로 모아 둡니다.
//!
//! ```text
//! Auswertung                    A2:H   (8열)   ID가 첫 열
//! InApp_AllyTime Checkup T0     A2:X   (24열)  ID = V(21), 제출 시각 = W(22)
//! InApp_AllyTime Checkup T4     A2:AN  (40열)  ID = AC(28), 제출 시각 = AD(29)
//! ```

use crate::error::SheetsError;
use crate::models::Timepoint;

/// 가져오는 시트(탭)의 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetKind {
    Overview,
    AssessmentT0,
    AssessmentT4,
}

impl SheetKind {
    pub fn name(self) -> &'static str {
        match self {
            SheetKind::Overview => "Auswertung",
            SheetKind::AssessmentT0 => "InApp_AllyTime Checkup T0",
            SheetKind::AssessmentT4 => "InApp_AllyTime Checkup T4",
        }
    }

    /// Sheets API에 넘기는 A1 표기 범위 (머리글 행 제외)
    pub fn range(self) -> &'static str {
        match self {
            SheetKind::Overview => "Auswertung!A2:H",
            SheetKind::AssessmentT0 => "InApp_AllyTime Checkup T0!A2:X",
            SheetKind::AssessmentT4 => "InApp_AllyTime Checkup T4!A2:AN",
        }
    }

    /// 범위가 포함하는 열 개수
    pub fn width(self) -> usize {
        match self {
            SheetKind::Overview => 8,
            SheetKind::AssessmentT0 => 24,
            SheetKind::AssessmentT4 => 40,
        }
    }
}

/// "Auswertung" 탭 열 번호
pub mod overview {
    pub const CLIENT_ID: usize = 0;
    pub const CHAT_LINK: usize = 1;
    pub const WELLBEING_T0: usize = 2;
    pub const WELLBEING_T4: usize = 3;
    pub const COACH_NAME: usize = 4;
    pub const STATUS: usize = 5;
    pub const REGISTRATION_DATE: usize = 6;
    pub const WEEKS: usize = 7;
}

/// T0/T4 탭이 공유하는 설문 항목 열 번호 (A–U)
pub mod questions {
    pub const WELLBEING: usize = 0;

    pub const STRESS: usize = 1;
    pub const EXHAUSTION: usize = 2;
    pub const ANXIETY: usize = 3;
    pub const DEPRESSION: usize = 4;
    pub const SELF_DOUBT: usize = 5;
    pub const SLEEP_PROBLEMS: usize = 6;
    pub const TENSION: usize = 7;
    pub const IRRITABILITY: usize = 8;
    pub const SOCIAL_WITHDRAWAL: usize = 9;
    pub const OTHER: usize = 10;

    pub const WORK_AREA: usize = 11;
    pub const PRIVATE_AREA: usize = 12;

    pub const ADEQUATE_SLEEP: usize = 13;
    pub const HEALTHY_EATING: usize = 14;
    pub const SUFFICIENT_REST: usize = 15;
    pub const EXERCISE: usize = 16;
    pub const SET_BOUNDARIES: usize = 17;
    pub const TIME_FOR_BEAUTY: usize = 18;
    pub const SHARE_EMOTIONS: usize = 19;
    pub const LIVE_VALUES: usize = 20;
}

/// T4 탭에만 있는 코칭 평가 열 번호 (V–AB)
pub mod coaching {
    pub const TRUST: usize = 21;
    pub const GENUINE_INTEREST: usize = 22;
    pub const MUTUAL_UNDERSTANDING: usize = 23;
    pub const GOAL_ALIGNMENT: usize = 24;
    pub const LEARNING_EXPERIENCE: usize = 25;
    pub const PROGRESS_ACHIEVEMENT: usize = 26;
    pub const GENERAL_SATISFACTION: usize = 27;
}

/// 평가 탭마다 다른 위치의 식별자/제출 시각 열
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssessmentLayout {
    pub sheet: SheetKind,
    pub timepoint: Timepoint,
    pub client_id: usize,
    pub submitted_at: usize,
    /// 코칭 평가 열(V–AB)이 있는지
    pub has_coaching: bool,
}

pub const T0_LAYOUT: AssessmentLayout = AssessmentLayout {
    sheet: SheetKind::AssessmentT0,
    timepoint: Timepoint::T0,
    client_id: 21,
    submitted_at: 22,
    has_coaching: false,
};

pub const T4_LAYOUT: AssessmentLayout = AssessmentLayout {
    sheet: SheetKind::AssessmentT4,
    timepoint: Timepoint::T4,
    client_id: 28,
    submitted_at: 29,
    has_coaching: true,
};

/// 수집 경계의 구조 검사
///
/// Sheets API는 범위 밖의 열을 돌려주지 않으므로, 범위보다 넓은 행이 있다면
/// 범위 설정이 열 배치와 어긋난 것입니다. 저장소를 건드리기 전에 실패시킵니다.
pub fn check_shape(sheet: SheetKind, rows: &[Vec<String>]) -> Result<(), SheetsError> {
    let expected = sheet.width();
    match rows.iter().position(|row| row.len() > expected) {
        Some(index) => Err(SheetsError::Layout {
            sheet: sheet.name(),
            // 시트의 실제 행 번호 (머리글 다음 행이 2)
            row: index + 2,
            width: rows[index].len(),
            expected,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_keep_identifier_inside_range() {
        for layout in [T0_LAYOUT, T4_LAYOUT] {
            assert!(layout.client_id < layout.sheet.width());
            assert!(layout.submitted_at < layout.sheet.width());
        }
        assert!(overview::WEEKS < SheetKind::Overview.width());
        assert!(coaching::GENERAL_SATISFACTION < T4_LAYOUT.client_id);
    }

    #[test]
    fn rejects_rows_wider_than_range() {
        let rows = vec![vec!["c1".to_string(); 8], vec!["x".to_string(); 9]];
        let err = check_shape(SheetKind::Overview, &rows).unwrap_err();
        match err {
            SheetsError::Layout { row, width, expected, .. } => {
                assert_eq!((row, width, expected), (3, 9, 8));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn accepts_short_rows() {
        let rows = vec![vec!["c1".to_string()], vec![]];
        assert!(check_shape(SheetKind::AssessmentT4, &rows).is_ok());
    }
}
