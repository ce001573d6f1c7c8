//! # 카테고리 요약 계산
//!
//! T0/T4 쌍들을 카테고리별 `CategorySummary`로 줄이고,
//! 네 카테고리(웰빙, 부담, 생활 영역, 자기 돌봄)의 평균으로 전체 개선도를 냅니다.
//!
//! ## 분류 기준
//! - 변화율 > +1% → 개선
//! - 변화율 < -1% → 악화
//! - 그 사이 → 변화 없음 (부동소수점 잡음과 의미 없는 흔들림을 흡수)

use super::changes::{calculate_numeric_change, Direction, MetricPair};
use crate::models::{Assessment, AssessmentSummary, CategorySummary};

/// 개선/악화로 판정하는 변화율 경계 (%)
const CHANGE_THRESHOLD: f64 = 1.0;

impl CategorySummary {
    fn record(&mut self, change: f64) {
        if change > CHANGE_THRESHOLD {
            self.improved += 1;
        } else if change < -CHANGE_THRESHOLD {
            self.worsened += 1;
        } else {
            self.unchanged += 1;
        }
        self.total += 1;
    }
}

/// 지표 쌍들의 평균 변화율과 개선/악화/유지 개수를 계산합니다.
///
/// 변화율이 정의되지 않는 쌍(값 없음, 알 수 없는 라벨)은 건너뜁니다.
/// 유효한 쌍이 없으면 `avg_change`는 0입니다.
pub fn calculate_category_average<'a, I>(pairs: I) -> CategorySummary
where
    I: IntoIterator<Item = MetricPair<'a>>,
{
    let mut summary = CategorySummary::default();
    let mut sum = 0.0;

    for change in pairs.into_iter().filter_map(|pair| pair.percent_change()) {
        sum += change;
        summary.record(change);
    }

    if summary.total > 0 {
        summary.avg_change = sum / summary.total as f64;
    }
    summary
}

/// 웰빙 점수 하나에 대한 요약
pub fn calculate_wellbeing_summary(t0: Option<i64>, t4: Option<i64>) -> CategorySummary {
    let mut summary = CategorySummary::default();
    if let Some(change) = calculate_numeric_change(t0, t4) {
        summary.avg_change = change;
        summary.record(change);
    }
    summary
}

/// 심리적 부담 10개 항목 요약 (낮아질수록 개선)
pub fn calculate_burdens_summary(t0: Option<&Assessment>, t4: Option<&Assessment>) -> CategorySummary {
    let t0_values = t0.map(|a| a.burdens.values()).unwrap_or_default();
    let t4_values = t4.map(|a| a.burdens.values()).unwrap_or_default();

    calculate_category_average(
        t0_values
            .into_iter()
            .zip(t4_values)
            .map(|(t0, t4)| MetricPair::categorical(t0, t4, Direction::Burden)),
    )
}

/// 생활 영역(일, 사생활) 요약
pub fn calculate_life_areas_summary(
    t0: Option<&Assessment>,
    t4: Option<&Assessment>,
) -> CategorySummary {
    calculate_category_average([
        MetricPair::numeric(t0.and_then(|a| a.work_area), t4.and_then(|a| a.work_area)),
        MetricPair::numeric(t0.and_then(|a| a.private_area), t4.and_then(|a| a.private_area)),
    ])
}

/// 자기 돌봄 8개 습관 요약 (빈도가 높아질수록 개선)
pub fn calculate_self_care_summary(
    t0: Option<&Assessment>,
    t4: Option<&Assessment>,
) -> CategorySummary {
    let t0_values = t0.map(|a| a.self_care.values()).unwrap_or_default();
    let t4_values = t4.map(|a| a.self_care.values()).unwrap_or_default();

    calculate_category_average(
        t0_values
            .into_iter()
            .zip(t4_values)
            .map(|(t0, t4)| MetricPair::categorical(t0, t4, Direction::Positive)),
    )
}

/// 전체 개선도: 네 카테고리 `avg_change`의 단순 평균
///
/// 항목 수와 무관하게 카테고리마다 한 번씩만 셉니다.
/// 두 평가 중 하나라도 없으면 0입니다.
pub fn calculate_overall_improvement(t0: Option<&Assessment>, t4: Option<&Assessment>) -> f64 {
    if t0.is_none() || t4.is_none() {
        return 0.0;
    }
    let [wellbeing, burdens, life_areas, self_care] = group_summaries(t0, t4);
    (wellbeing.avg_change + burdens.avg_change + life_areas.avg_change + self_care.avg_change) / 4.0
}

fn group_summaries(t0: Option<&Assessment>, t4: Option<&Assessment>) -> [CategorySummary; 4] {
    [
        calculate_wellbeing_summary(t0.and_then(|a| a.wellbeing), t4.and_then(|a| a.wellbeing)),
        calculate_burdens_summary(t0, t4),
        calculate_life_areas_summary(t0, t4),
        calculate_self_care_summary(t0, t4),
    ]
}

/// 네 카테고리 요약과 전체 개선도를 한 번에 계산합니다.
pub fn summarize_assessments(t0: Option<&Assessment>, t4: Option<&Assessment>) -> AssessmentSummary {
    let [wellbeing, burdens, life_areas, self_care] = group_summaries(t0, t4);

    AssessmentSummary {
        wellbeing,
        burdens,
        life_areas,
        self_care,
        overall_improvement: calculate_overall_improvement(t0, t4),
    }
}
