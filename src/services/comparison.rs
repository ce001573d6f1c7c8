//! # 지표별 비교표
//!
//! 상세 화면에서 지표 하나마다 T0 값, T4 값, 변화량, 변화율, 추세를 보여줍니다.
//! 요약 계산(`summary`)과 달리 원시 변화량을 그대로 보여주며,
//! 좋아졌는지 나빠졌는지는 `Trend`가 방향을 반영해 판정합니다.

use super::categories::{category_label, category_rank};
use super::changes::{calculate_change, calculate_percentage_change, trend, Direction, Trend};
use crate::models::Assessment;
use serde::Serialize;

/// 지표 한 줄
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricComparison {
    pub label: &'static str,
    pub t0: Option<String>,
    pub t4: Option<String>,
    /// `t4 - t0` (범주형은 순위 차이)
    pub change: Option<i64>,
    /// 기준값이 0이면 없음
    pub percentage_change: Option<f64>,
    pub trend: Option<Trend>,
}

fn numeric_row(label: &'static str, t0: Option<i64>, t4: Option<i64>) -> MetricComparison {
    let change = calculate_change(t0, t4);
    MetricComparison {
        label,
        t0: t0.map(|v| v.to_string()),
        t4: t4.map(|v| v.to_string()),
        change,
        percentage_change: calculate_percentage_change(t0, t4),
        trend: change.map(|c| trend(c as f64, Direction::Positive)),
    }
}

fn categorical_row(
    label: &'static str,
    t0: Option<&str>,
    t4: Option<&str>,
    direction: Direction,
) -> MetricComparison {
    // 알 수 없는 라벨은 값 없음과 같게 취급합니다.
    let rank = |value: Option<&str>| Some(i64::from(category_rank(value))).filter(|&r| r > 0);
    let (t0_rank, t4_rank) = (rank(t0), rank(t4));
    let change = calculate_change(t0_rank, t4_rank);

    MetricComparison {
        label,
        t0: t0_rank.map(|r| category_label(r as u8).to_string()),
        t4: t4_rank.map(|r| category_label(r as u8).to_string()),
        change,
        percentage_change: calculate_percentage_change(t0_rank, t4_rank),
        trend: change.map(|c| trend(c as f64, direction)),
    }
}

/// 두 평가를 지표별로 나란히 놓습니다. 평가가 없는 쪽은 값이 비어 있습니다.
pub fn compare_assessments(t0: Option<&Assessment>, t4: Option<&Assessment>) -> Vec<MetricComparison> {
    const BURDEN_LABELS: [&str; 10] = [
        "Stress",
        "Erschöpfung",
        "Angst",
        "Depression",
        "Selbstzweifel",
        "Schlafprobleme",
        "Anspannung",
        "Reizbarkeit",
        "Sozialer Rückzug",
        "Sonstiges",
    ];
    const SELF_CARE_LABELS: [&str; 8] = [
        "Ausreichend Schlaf",
        "Gesunde Ernährung",
        "Ausreichend Erholung",
        "Bewegung",
        "Grenzen setzen",
        "Zeit für Schönes",
        "Emotionen teilen",
        "Nach Werten leben",
    ];

    let mut rows = vec![numeric_row(
        "Wohlbefinden",
        t0.and_then(|a| a.wellbeing),
        t4.and_then(|a| a.wellbeing),
    )];

    let t0_burdens = t0.map(|a| a.burdens.values()).unwrap_or_default();
    let t4_burdens = t4.map(|a| a.burdens.values()).unwrap_or_default();
    for ((label, before), after) in BURDEN_LABELS.into_iter().zip(t0_burdens).zip(t4_burdens) {
        rows.push(categorical_row(label, before, after, Direction::Burden));
    }

    rows.push(numeric_row(
        "Arbeitsbereich",
        t0.and_then(|a| a.work_area),
        t4.and_then(|a| a.work_area),
    ));
    rows.push(numeric_row(
        "Privatbereich",
        t0.and_then(|a| a.private_area),
        t4.and_then(|a| a.private_area),
    ));

    let t0_care = t0.map(|a| a.self_care.values()).unwrap_or_default();
    let t4_care = t4.map(|a| a.self_care.values()).unwrap_or_default();
    for ((label, before), after) in SELF_CARE_LABELS.into_iter().zip(t0_care).zip(t4_care) {
        rows.push(categorical_row(label, before, after, Direction::Positive));
    }

    rows
}
