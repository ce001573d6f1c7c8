//! # 시트 행 파서
//!
//! Sheets API가 돌려준 문자열 행렬을 타입이 있는 레코드로 바꿉니다.
//! 셀 하나가 잘못되었다고 동기화 전체를 실패시키지 않습니다:
//!
//! - 식별자가 없는 행 → 조용히 건너뜀
//! - 빈 값, 공백, `#N/A` 같은 오류 표시 → `None`
//! - 앞부분을 정수로 읽을 수 없거나 0–10 밖인 점수 셀 → `None` (경고 로그)
//! - 읽을 수 없는 날짜 → 현재 시각으로 대체 (경고 로그 + `date_fallbacks` 집계)
//!
//! 결과는 식별자를 키로 하는 맵이며, 같은 식별자가 다시 나오면 나중 행이 이깁니다.

use super::layout::{coaching, overview, questions, AssessmentLayout};
use crate::models::{Assessment, Burdens, ClientOverview, CoachingEvaluation, SelfCare};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::collections::HashMap;
use std::ops::RangeInclusive;

/// 스프레드시트 오류 표시값. 빈 셀과 똑같이 취급합니다.
const SENTINELS: [&str; 6] = ["#N/A", "#REF!", "#VALUE!", "#DIV/0!", "#NAME?", "#ERROR!"];

/// 모든 숫자 점수의 허용 범위
const SCORE_RANGE: RangeInclusive<i64> = 0..=10;

const UNKNOWN_COACH: &str = "Unbekannter Coach";
const UNKNOWN_STATUS: &str = "Unbekannt";

/// 키 순서를 유지하는 맵
///
/// 처음 나온 순서를 지키고, 같은 키가 다시 들어오면 그 자리의 값을 교체합니다.
#[derive(Debug, Clone)]
pub struct KeyedRecords<T> {
    entries: Vec<(String, T)>,
    index: HashMap<String, usize>,
}

impl<T> Default for KeyedRecords<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> KeyedRecords<T> {
    /// 값을 넣습니다. 기존 값을 교체했다면 `true`를 돌려줍니다.
    pub fn insert(&mut self, key: String, value: T) -> bool {
        match self.index.get(&key) {
            Some(&position) => {
                self.entries[position].1 = value;
                true
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                false
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_map(self) -> HashMap<String, T> {
        self.entries.into_iter().collect()
    }
}

impl<T> IntoIterator for KeyedRecords<T> {
    type Item = (String, T);
    type IntoIter = std::vec::IntoIter<(String, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// 시트 하나의 파싱 결과
#[derive(Debug, Clone)]
pub struct ParsedSheet<T> {
    pub records: KeyedRecords<T>,
    /// 식별자가 없어 건너뛴 행 수
    pub skipped_rows: usize,
    /// 날짜를 현재 시각으로 대체한 횟수
    pub date_fallbacks: usize,
}

impl<T> Default for ParsedSheet<T> {
    fn default() -> Self {
        Self {
            records: KeyedRecords::default(),
            skipped_rows: 0,
            date_fallbacks: 0,
        }
    }
}

/// 행 하나를 열 번호로 읽는 보기(view). 짧은 행의 없는 열은 빈 셀입니다.
#[derive(Clone, Copy)]
struct Row<'a> {
    cells: &'a [String],
    /// 로그용 시트 행 번호
    sheet_row: usize,
}

impl<'a> Row<'a> {
    fn new(cells: &'a [String], index: usize) -> Self {
        Self {
            cells,
            sheet_row: index + 2,
        }
    }

    fn cell(&self, column: usize) -> Option<&'a str> {
        clean_cell(self.cells.get(column).map(String::as_str))
    }

    fn text(&self, column: usize) -> Option<String> {
        self.cell(column).map(str::to_string)
    }

    fn number(&self, column: usize) -> Option<i64> {
        let value = self.cell(column)?;
        let Some(number) = leading_integer(value) else {
            tracing::warn!(row = self.sheet_row, column, value, "Non-numeric cell treated as empty");
            return None;
        };
        if !SCORE_RANGE.contains(&number) {
            tracing::warn!(row = self.sheet_row, column, value, "Score outside 0-10 treated as empty");
            return None;
        }
        Some(number)
    }
}

/// 앞부분의 부호 있는 정수만 읽습니다: "7,0" → 7, "8/10" → 8, "viel" → `None`
fn leading_integer(value: &str) -> Option<i64> {
    let unsigned = value.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(value);
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return None;
    }
    let end = value.len() - unsigned.len() + digits;
    value[..end].parse().ok()
}

/// 앞부분의 소수를 읽습니다: "3.5 Wochen" → 3.5
fn leading_float(value: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (index, c) in value.char_indices() {
        match c {
            '+' | '-' if index == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = index + c.len_utf8();
    }
    if !seen_digit {
        return None;
    }
    value[..end].parse().ok()
}

/// 빈 값, 공백, 오류 표시값을 `None`으로 정리하고 나머지는 trim합니다.
fn clean_cell(cell: Option<&str>) -> Option<&str> {
    let value = cell?.trim();
    if value.is_empty() || SENTINELS.contains(&value) {
        None
    } else {
        Some(value)
    }
}

/// "DD.MM.YYYY" 또는 "DD.MM.YYYY HH:MM[:SS]" 형식의 날짜를 읽습니다.
///
/// 시간 부분이 없거나 읽을 수 없으면 자정으로 둡니다.
pub fn parse_sheet_date(cell: Option<&str>) -> Option<DateTime<Utc>> {
    let value = clean_cell(cell)?;
    let mut parts = value.split_whitespace();
    let date = NaiveDate::parse_from_str(parts.next()?, "%d.%m.%Y").ok()?;

    let time = parts.next().and_then(|t| {
        NaiveTime::parse_from_str(t, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M"))
            .ok()
    });
    let datetime = match time {
        Some(time) => date.and_time(time),
        None => date.and_hms_opt(0, 0, 0)?,
    };
    Some(datetime.and_utc())
}

/// 주 수: 소수점 쉼표("4,0")와 뒤따르는 단위를 허용하고, 읽을 수 없거나 음수면 0입니다.
fn parse_weeks(cell: Option<&str>) -> f64 {
    clean_cell(cell)
        .and_then(|v| leading_float(&v.replacen(',', ".", 1)))
        .filter(|weeks| weeks.is_finite())
        .map_or(0.0, |weeks| weeks.max(0.0))
}

/// 날짜 셀을 읽고, 실패하면 `now`로 대체하면서 경고를 남깁니다.
fn date_or_now(
    row: &Row<'_>,
    column: usize,
    field: &'static str,
    now: DateTime<Utc>,
    fallbacks: &mut usize,
) -> DateTime<Utc> {
    let raw = row.cells.get(column).map(String::as_str);
    parse_sheet_date(raw).unwrap_or_else(|| {
        tracing::warn!(
            row = row.sheet_row,
            field,
            value = raw.unwrap_or(""),
            "Invalid date, falling back to current time"
        );
        *fallbacks += 1;
        now
    })
}

/// "Auswertung" 탭 행들을 클라이언트 개요로 변환합니다.
pub fn parse_overview_rows(rows: &[Vec<String>], now: DateTime<Utc>) -> ParsedSheet<ClientOverview> {
    let mut parsed = ParsedSheet::default();

    for (index, cells) in rows.iter().enumerate() {
        let row = Row::new(cells, index);
        let Some(client_id) = row.text(overview::CLIENT_ID) else {
            parsed.skipped_rows += 1;
            continue;
        };

        let registration_date = date_or_now(
            &row,
            overview::REGISTRATION_DATE,
            "registration_date",
            now,
            &mut parsed.date_fallbacks,
        );

        let record = ClientOverview {
            client_name: format!("Klient {}", client_id.chars().take(8).collect::<String>()),
            coach_name: row
                .text(overview::COACH_NAME)
                .unwrap_or_else(|| UNKNOWN_COACH.to_string()),
            status: row
                .text(overview::STATUS)
                .unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
            registration_date,
            weeks: parse_weeks(cells.get(overview::WEEKS).map(String::as_str)),
            chat_link: row.text(overview::CHAT_LINK).unwrap_or_default(),
            wellbeing_t0_basic: row.number(overview::WELLBEING_T0),
            wellbeing_t4_basic: row.number(overview::WELLBEING_T4),
            client_id: client_id.clone(),
        };

        if parsed.records.insert(client_id, record) {
            tracing::debug!(row = row.sheet_row, "Duplicate overview row replaces earlier one");
        }
    }

    parsed
}

/// T0 또는 T4 탭 행들을 평가 레코드로 변환합니다.
///
/// 코칭 평가 열은 `layout.has_coaching`(T4)일 때만 읽습니다.
pub fn parse_assessment_rows(
    rows: &[Vec<String>],
    layout: &AssessmentLayout,
    now: DateTime<Utc>,
) -> ParsedSheet<Assessment> {
    let mut parsed = ParsedSheet::default();

    for (index, cells) in rows.iter().enumerate() {
        let row = Row::new(cells, index);
        let Some(client_id) = row.text(layout.client_id) else {
            parsed.skipped_rows += 1;
            continue;
        };

        let submitted_at = date_or_now(
            &row,
            layout.submitted_at,
            "submitted_at",
            now,
            &mut parsed.date_fallbacks,
        );

        let coaching = if layout.has_coaching {
            CoachingEvaluation {
                trust: row.text(coaching::TRUST),
                genuine_interest: row.text(coaching::GENUINE_INTEREST),
                mutual_understanding: row.text(coaching::MUTUAL_UNDERSTANDING),
                goal_alignment: row.text(coaching::GOAL_ALIGNMENT),
                learning_experience: row.number(coaching::LEARNING_EXPERIENCE),
                progress_achievement: row.number(coaching::PROGRESS_ACHIEVEMENT),
                general_satisfaction: row.number(coaching::GENERAL_SATISFACTION),
            }
        } else {
            CoachingEvaluation::default()
        };
        if layout.has_coaching && coaching.is_empty() {
            tracing::debug!(row = row.sheet_row, "T4 row has no coaching evaluation");
        }

        let assessment = Assessment {
            client_id: client_id.clone(),
            timepoint: layout.timepoint,
            submitted_at,
            wellbeing: row.number(questions::WELLBEING),
            burdens: Burdens {
                stress: row.text(questions::STRESS),
                exhaustion: row.text(questions::EXHAUSTION),
                anxiety: row.text(questions::ANXIETY),
                depression: row.text(questions::DEPRESSION),
                self_doubt: row.text(questions::SELF_DOUBT),
                sleep_problems: row.text(questions::SLEEP_PROBLEMS),
                tension: row.text(questions::TENSION),
                irritability: row.text(questions::IRRITABILITY),
                social_withdrawal: row.text(questions::SOCIAL_WITHDRAWAL),
                other: row.text(questions::OTHER),
            },
            work_area: row.number(questions::WORK_AREA),
            private_area: row.number(questions::PRIVATE_AREA),
            self_care: SelfCare {
                adequate_sleep: row.text(questions::ADEQUATE_SLEEP),
                healthy_eating: row.text(questions::HEALTHY_EATING),
                sufficient_rest: row.text(questions::SUFFICIENT_REST),
                exercise: row.text(questions::EXERCISE),
                set_boundaries: row.text(questions::SET_BOUNDARIES),
                time_for_beauty: row.text(questions::TIME_FOR_BEAUTY),
                share_emotions: row.text(questions::SHARE_EMOTIONS),
                live_values: row.text(questions::LIVE_VALUES),
            },
            coaching,
        };

        if parsed.records.insert(client_id, assessment) {
            tracing::debug!(
                row = row.sheet_row,
                timepoint = %layout.timepoint,
                "Duplicate assessment row replaces earlier one"
            );
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Timepoint;
    use crate::services::sheets::layout::{T0_LAYOUT, T4_LAYOUT};
    use chrono::{Datelike, TimeZone, Timelike};

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    /// 설문 항목 21개(A–U) 뒤에 `tail`을 붙인 평가 행
    fn assessment_row(wellbeing: &str, stress: &str, tail: &[&str]) -> Vec<String> {
        let mut cells = vec![String::new(); 21];
        cells[questions::WELLBEING] = wellbeing.to_string();
        cells[questions::STRESS] = stress.to_string();
        cells[questions::WORK_AREA] = "6".to_string();
        cells[questions::ADEQUATE_SLEEP] = " Oft ".to_string();
        cells.extend(tail.iter().map(|c| c.to_string()));
        cells
    }

    #[test]
    fn parses_overview_row() {
        let rows = vec![row(&["c1", "http://chat", "4", "7", "CoachA", "Aktiv", "15.01.2024", "4,0"])];
        let parsed = parse_overview_rows(&rows, fixed_now());

        let client = parsed.records.get("c1").unwrap();
        assert_eq!(client.client_name, "Klient c1");
        assert_eq!(client.chat_link, "http://chat");
        assert_eq!(client.wellbeing_t0_basic, Some(4));
        assert_eq!(client.wellbeing_t4_basic, Some(7));
        assert_eq!(client.coach_name, "CoachA");
        assert_eq!(client.status, "Aktiv");
        assert_eq!(client.weeks, 4.0);
        assert_eq!(
            client.registration_date.date_naive(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert_eq!(parsed.date_fallbacks, 0);
    }

    #[test]
    fn overview_defaults_for_sentinels() {
        let rows = vec![row(&[
            "0123456789abcdef",
            "",
            "#N/A",
            "  ",
            "#N/A",
            "",
            "#N/A",
            "#N/A",
        ])];
        let parsed = parse_overview_rows(&rows, fixed_now());

        let client = parsed.records.get("0123456789abcdef").unwrap();
        assert_eq!(client.client_name, "Klient 01234567");
        assert_eq!(client.coach_name, "Unbekannter Coach");
        assert_eq!(client.status, "Unbekannt");
        assert_eq!(client.chat_link, "");
        assert_eq!(client.wellbeing_t0_basic, None);
        assert_eq!(client.wellbeing_t4_basic, None);
        assert_eq!(client.weeks, 0.0);
        assert_eq!(client.registration_date, fixed_now());
        assert_eq!(parsed.date_fallbacks, 1);
    }

    #[test]
    fn rows_without_identifier_are_skipped() {
        let rows = vec![
            row(&["", "http://chat", "4"]),
            vec![],
            row(&["c2", "", "", "", "", "", "01.02.2024", "1"]),
        ];
        let parsed = parse_overview_rows(&rows, fixed_now());
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.skipped_rows, 2);
        assert!(parsed.records.get("c2").is_some());
    }

    #[test]
    fn duplicate_identifiers_keep_last_row_in_first_position() {
        let rows = vec![
            row(&["a", "", "1"]),
            row(&["b", "", "2"]),
            row(&["a", "", "9"]),
        ];
        let parsed = parse_overview_rows(&rows, fixed_now());

        let ids: Vec<_> = parsed.records.clone().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(parsed.records.get("a").unwrap().wellbeing_t0_basic, Some(9));
    }

    #[test]
    fn scores_read_the_leading_integer() {
        let rows = vec![
            row(&["c1", "", "7,0", "7.5", "", "", "01.03.2024", "3,5 Wochen"]),
            row(&["c2", "", "8/10", "viel"]),
        ];
        let parsed = parse_overview_rows(&rows, fixed_now());

        let c1 = parsed.records.get("c1").unwrap();
        assert_eq!(c1.wellbeing_t0_basic, Some(7));
        assert_eq!(c1.wellbeing_t4_basic, Some(7));
        assert_eq!(c1.weeks, 3.5);

        let c2 = parsed.records.get("c2").unwrap();
        assert_eq!(c2.wellbeing_t0_basic, Some(8));
        assert_eq!(c2.wellbeing_t4_basic, None);
    }

    #[test]
    fn scores_outside_zero_to_ten_become_none() {
        let rows = vec![
            assessment_row("-2", "", &["c1", "01.03.2024"]),
            assessment_row("9223372036854775807", "", &["c2", "01.03.2024"]),
            assessment_row("11", "", &["c3", "01.03.2024"]),
            assessment_row("99999999999999999999", "", &["c4", "01.03.2024"]),
            assessment_row("10", "", &["c5", "01.03.2024"]),
            assessment_row("0", "", &["c6", "01.03.2024"]),
        ];
        let parsed = parse_assessment_rows(&rows, &T0_LAYOUT, fixed_now());

        for id in ["c1", "c2", "c3", "c4"] {
            assert_eq!(parsed.records.get(id).unwrap().wellbeing, None, "{id}");
        }
        assert_eq!(parsed.records.get("c5").unwrap().wellbeing, Some(10));
        assert_eq!(parsed.records.get("c6").unwrap().wellbeing, Some(0));
    }

    #[test]
    fn leading_integer_needs_a_digit() {
        assert_eq!(leading_integer("+4"), Some(4));
        assert_eq!(leading_integer("-3 Punkte"), Some(-3));
        assert_eq!(leading_integer("-"), None);
        assert_eq!(leading_integer("ca. 5"), None);
    }

    #[test]
    fn weeks_are_never_negative() {
        assert_eq!(parse_weeks(Some("-2")), 0.0);
        assert_eq!(parse_weeks(Some("2.5")), 2.5);
        assert_eq!(parse_weeks(Some("4,0")), 4.0);
        assert_eq!(parse_weeks(Some("abc")), 0.0);
        assert_eq!(parse_weeks(Some("-")), 0.0);
        assert_eq!(parse_weeks(None), 0.0);
    }

    #[test]
    fn dates_accept_optional_time() {
        let date = parse_sheet_date(Some("03.02.2024 14:05:30")).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 2, 3));
        assert_eq!((date.hour(), date.minute(), date.second()), (14, 5, 30));

        let short = parse_sheet_date(Some("3.2.2024 09:15")).unwrap();
        assert_eq!((short.hour(), short.minute()), (9, 15));

        let midnight = parse_sheet_date(Some("03.02.2024")).unwrap();
        assert_eq!(midnight.hour(), 0);

        assert_eq!(parse_sheet_date(Some("2024-02-03")), None);
        assert_eq!(parse_sheet_date(Some("31.02.2024")), None);
        assert_eq!(parse_sheet_date(Some("#N/A")), None);
    }

    #[test]
    fn t0_rows_use_t0_column_map() {
        let rows = vec![assessment_row("4", "Stark", &["client-7", "10.01.2024 08:00:00", "ignored"])];
        let parsed = parse_assessment_rows(&rows, &T0_LAYOUT, fixed_now());

        let assessment = parsed.records.get("client-7").unwrap();
        assert_eq!(assessment.timepoint, Timepoint::T0);
        assert_eq!(assessment.wellbeing, Some(4));
        assert_eq!(assessment.burdens.stress.as_deref(), Some("Stark"));
        assert_eq!(assessment.work_area, Some(6));
        assert_eq!(assessment.self_care.adequate_sleep.as_deref(), Some("Oft"));
        assert_eq!(assessment.submitted_at.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert!(assessment.coaching.is_empty());
    }

    #[test]
    fn t4_rows_use_t4_column_map_and_coaching_fields() {
        let tail = [
            "Stark", "Mittel", "Oft", "Gering", // 코칭 평가 범주형 (V–Y)
            "8", "7", "#N/A", // 코칭 평가 점수 (Z–AB)
            "client-7", "12.02.2024 10:00:00",
        ];
        let rows = vec![assessment_row("7", "Gering", &tail)];
        let parsed = parse_assessment_rows(&rows, &T4_LAYOUT, fixed_now());

        let assessment = parsed.records.get("client-7").unwrap();
        assert_eq!(assessment.timepoint, Timepoint::T4);
        assert_eq!(assessment.wellbeing, Some(7));
        assert_eq!(assessment.coaching.trust.as_deref(), Some("Stark"));
        assert_eq!(assessment.coaching.goal_alignment.as_deref(), Some("Gering"));
        assert_eq!(assessment.coaching.learning_experience, Some(8));
        assert_eq!(assessment.coaching.progress_achievement, Some(7));
        assert_eq!(assessment.coaching.general_satisfaction, None);
        assert_eq!(parsed.date_fallbacks, 0);
    }

    #[test]
    fn t0_layout_ignores_identifier_at_t4_position() {
        // T4 위치(28)에만 ID가 있는 행은 T0 시트에서 식별자가 없는 행입니다.
        let mut cells = assessment_row("4", "Stark", &[]);
        cells.resize(30, String::new());
        cells[28] = "client-9".to_string();

        let parsed = parse_assessment_rows(&[cells], &T0_LAYOUT, fixed_now());
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.skipped_rows, 1);
    }

    #[test]
    fn missing_submission_date_falls_back_to_now() {
        let rows = vec![assessment_row("5", "", &["c1"])];
        let parsed = parse_assessment_rows(&rows, &T0_LAYOUT, fixed_now());
        assert_eq!(parsed.records.get("c1").unwrap().submitted_at, fixed_now());
        assert_eq!(parsed.date_fallbacks, 1);
    }
}
