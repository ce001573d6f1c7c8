//! # 변화량 계산
//!
//! T0 값과 T4 값 사이의 변화를 계산합니다.
//!
//! - 숫자 지표(0–10): `(t4 - t0) / t0 * 100`, 기준값 0은 특수 처리
//! - 범주형 지표: 라벨을 순위로 바꾼 뒤 같은 공식을 적용하고,
//!   부담(burden) 지표는 부호를 뒤집어 "감소 = 개선 = 양수"가 되게 합니다.
//!
//! 두 값 중 하나라도 없으면 결과는 `None`(정의되지 않음)입니다.

use super::categories::category_rank;
use serde::Serialize;

/// 지표의 바람직한 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// 높을수록 좋음 (웰빙, 생활 영역, 자기 돌봄)
    Positive,
    /// 낮을수록 좋음 (스트레스 등 심리적 부담)
    Burden,
}

impl Direction {
    pub fn is_positive(self) -> bool {
        matches!(self, Direction::Positive)
    }
}

/// 한 시점의 지표 값
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric<'a> {
    Numeric(Option<i64>),
    Categorical(Option<&'a str>),
}

/// T0/T4 한 쌍과 그 지표의 방향
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricPair<'a> {
    pub t0: Metric<'a>,
    pub t4: Metric<'a>,
    pub direction: Direction,
}

impl<'a> MetricPair<'a> {
    pub fn numeric(t0: Option<i64>, t4: Option<i64>) -> Self {
        Self {
            t0: Metric::Numeric(t0),
            t4: Metric::Numeric(t4),
            direction: Direction::Positive,
        }
    }

    pub fn categorical(t0: Option<&'a str>, t4: Option<&'a str>, direction: Direction) -> Self {
        Self {
            t0: Metric::Categorical(t0),
            t4: Metric::Categorical(t4),
            direction,
        }
    }

    /// 이 쌍의 변화율(%)을 계산합니다.
    ///
    /// 숫자/범주형이 섞인 쌍은 비교할 수 없으므로 `None`입니다.
    pub fn percent_change(&self) -> Option<f64> {
        match (self.t0, self.t4) {
            (Metric::Numeric(t0), Metric::Numeric(t4)) => calculate_numeric_change(t0, t4),
            (Metric::Categorical(t0), Metric::Categorical(t4)) => {
                calculate_categorical_change(t0, t4, self.direction)
            }
            _ => None,
        }
    }
}

/// 숫자 지표의 변화율(%)
///
/// `t0 == 0`이면 0으로 나누지 않도록 `t4 == 0 → 0%`, 그 외 `100%`로 정합니다.
pub fn calculate_numeric_change(t0: Option<i64>, t4: Option<i64>) -> Option<f64> {
    let (t0, t4) = (t0?, t4?);
    if t0 == 0 {
        return Some(if t4 == 0 { 0.0 } else { 100.0 });
    }
    Some((t4 as f64 - t0 as f64) / t0 as f64 * 100.0)
}

/// 범주형 지표의 변화율(%)
///
/// 어느 한쪽 라벨이 없거나 알 수 없는 라벨(순위 0)이면 `None`입니다.
/// 부담 지표는 부호를 뒤집습니다: Stark → Gering은 양수(개선)가 됩니다.
pub fn calculate_categorical_change(
    t0: Option<&str>,
    t4: Option<&str>,
    direction: Direction,
) -> Option<f64> {
    let t0_rank = category_rank(t0);
    let t4_rank = category_rank(t4);
    if t0_rank == 0 || t4_rank == 0 {
        return None;
    }

    let change = (f64::from(t4_rank) - f64::from(t0_rank)) / f64::from(t0_rank) * 100.0;
    Some(if direction.is_positive() { change } else { -change })
}

/// 표시용 원시 변화량 `t4 - t0`
///
/// 차이가 `i64` 범위를 벗어나면 `None`입니다.
pub fn calculate_change(t0: Option<i64>, t4: Option<i64>) -> Option<i64> {
    t4?.checked_sub(t0?)
}

/// 표시용 변화율: 기준값이 0이면 비율을 보여줄 수 없으므로 `None`입니다.
pub fn calculate_percentage_change(t0: Option<i64>, t4: Option<i64>) -> Option<f64> {
    let (t0, t4) = (t0?, t4?);
    if t0 == 0 {
        return None;
    }
    Some((t4 as f64 - t0 as f64) / t0 as f64 * 100.0)
}

/// 변화 방향 표시 (↑ 개선 / ↓ 악화 / → 변화 없음)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improved,
    Worsened,
    Unchanged,
}

/// 원시 변화량과 방향으로 추세를 판정합니다. 0은 방향과 무관하게 `Unchanged`입니다.
pub fn trend(change: f64, direction: Direction) -> Trend {
    if change == 0.0 {
        return Trend::Unchanged;
    }
    let improved = match direction {
        Direction::Positive => change > 0.0,
        Direction::Burden => change < 0.0,
    };
    if improved {
        Trend::Improved
    } else {
        Trend::Worsened
    }
}
