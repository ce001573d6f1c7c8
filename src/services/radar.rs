//! # 레이더 차트 정규화
//!
//! 서로 다른 척도의 지표를 하나의 0–10 축으로 옮깁니다.
//!
//! - 숫자 지표: 이미 0–10이므로 그대로
//! - 부담 지표: Gering(1) → 10, Mittel(2) → 5, Stark(3) → 0
//! - 자기 돌봄 지표: Selten(1) → 3.33, Mittel(2) → 6.67, Oft(3) → 10
//! - 값 없음 / 알 수 없는 라벨 → 0

use super::categories::category_rank;
use super::changes::{Direction, Metric};
use crate::models::{Assessment, RadarChartData};

/// 레이더 차트 축 이름 (↓는 낮을수록 좋은 부담 지표)
pub const RADAR_LABELS: [&str; 8] = [
    "Wohlbefinden",
    "Stress (↓)",
    "Erschöpfung (↓)",
    "Angst (↓)",
    "Depression (↓)",
    "Arbeitsbereich",
    "Privatbereich",
    "Selbstfürsorge",
];

/// 지표 하나를 0–10 축 값으로 변환합니다.
pub fn normalize_for_radar(value: Metric<'_>, direction: Direction) -> f64 {
    match value {
        Metric::Numeric(v) => v.map_or(0.0, |v| v as f64),
        Metric::Categorical(label) => {
            let rank = category_rank(label);
            if rank == 0 {
                return 0.0;
            }
            let rank = f64::from(rank);
            match direction {
                Direction::Burden => 10.0 - (rank - 1.0) * 5.0,
                Direction::Positive => rank / 3.0 * 10.0,
            }
        }
    }
}

/// 자기 돌봄 8개 습관의 정규화 값 평균
fn self_care_axis(assessment: &Assessment) -> f64 {
    let values = assessment.self_care.values();
    let sum: f64 = values
        .iter()
        .map(|label| normalize_for_radar(Metric::Categorical(*label), Direction::Positive))
        .sum();
    sum / values.len() as f64
}

fn radar_series(assessment: Option<&Assessment>) -> Vec<f64> {
    let Some(a) = assessment else {
        return vec![0.0; RADAR_LABELS.len()];
    };

    let burden = |label: &Option<String>| {
        normalize_for_radar(Metric::Categorical(label.as_deref()), Direction::Burden)
    };
    let numeric = |v: Option<i64>| normalize_for_radar(Metric::Numeric(v), Direction::Positive);

    vec![
        numeric(a.wellbeing),
        burden(&a.burdens.stress),
        burden(&a.burdens.exhaustion),
        burden(&a.burdens.anxiety),
        burden(&a.burdens.depression),
        numeric(a.work_area),
        numeric(a.private_area),
        self_care_axis(a),
    ]
}

/// T0/T4 평가로 레이더 차트 데이터를 만듭니다.
///
/// 둘 다 없으면 빈 데이터, 한쪽만 없으면 그쪽 계열은 전부 0입니다.
pub fn prepare_radar_chart_data(
    t0: Option<&Assessment>,
    t4: Option<&Assessment>,
) -> RadarChartData {
    if t0.is_none() && t4.is_none() {
        return RadarChartData::default();
    }

    RadarChartData {
        labels: RADAR_LABELS.to_vec(),
        t0_data: radar_series(t0),
        t4_data: radar_series(t4),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Burdens, CoachingEvaluation, SelfCare, Timepoint};
    use chrono::Utc;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn burden_ranks_map_inverted() {
        let n = |l| normalize_for_radar(Metric::Categorical(Some(l)), Direction::Burden);
        assert_eq!(n("Gering"), 10.0);
        assert_eq!(n("Mittel"), 5.0);
        assert_eq!(n("Stark"), 0.0);
    }

    #[test]
    fn positive_ranks_scale_to_ten() {
        let n = |l| normalize_for_radar(Metric::Categorical(Some(l)), Direction::Positive);
        assert!(close(n("Selten"), 10.0 / 3.0));
        assert!(close(n("Mittel"), 20.0 / 3.0));
        assert_eq!(n("Oft"), 10.0);
    }

    #[test]
    fn absent_and_unknown_values_are_zero() {
        assert_eq!(normalize_for_radar(Metric::Numeric(None), Direction::Positive), 0.0);
        assert_eq!(normalize_for_radar(Metric::Categorical(None), Direction::Burden), 0.0);
        assert_eq!(
            normalize_for_radar(Metric::Categorical(Some("unbekannt")), Direction::Burden),
            0.0
        );
    }

    #[test]
    fn numeric_values_pass_through() {
        assert_eq!(normalize_for_radar(Metric::Numeric(Some(7)), Direction::Positive), 7.0);
    }

    #[test]
    fn no_assessments_yield_empty_chart() {
        let data = prepare_radar_chart_data(None, None);
        assert!(data.labels.is_empty());
        assert!(data.t0_data.is_empty());
        assert!(data.t4_data.is_empty());
        assert_eq!(prepare_radar_chart_data(None, None), data);
    }

    #[test]
    fn missing_side_is_all_zero() {
        let t0 = Assessment {
            client_id: "c1".into(),
            timepoint: Timepoint::T0,
            submitted_at: Utc::now(),
            wellbeing: Some(4),
            burdens: Burdens {
                stress: Some("Stark".into()),
                exhaustion: Some("Gering".into()),
                ..Default::default()
            },
            work_area: Some(6),
            private_area: None,
            self_care: SelfCare {
                adequate_sleep: Some("Oft".into()),
                exercise: Some("Oft".into()),
                ..Default::default()
            },
            coaching: CoachingEvaluation::default(),
        };

        let data = prepare_radar_chart_data(Some(&t0), None);
        assert_eq!(data.labels.len(), 8);
        assert_eq!(data.t4_data, vec![0.0; 8]);

        assert_eq!(data.t0_data[0], 4.0);
        assert_eq!(data.t0_data[1], 0.0); // Stark
        assert_eq!(data.t0_data[2], 10.0); // Gering
        assert_eq!(data.t0_data[3], 0.0); // 값 없음
        assert_eq!(data.t0_data[5], 6.0);
        assert_eq!(data.t0_data[6], 0.0);
        // 8개 중 2개만 Oft(10) → 20 / 8
        assert!(close(data.t0_data[7], 2.5));
    }
}
