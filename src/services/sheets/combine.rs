//! # 시트 결합
//!
//! 개요/T0/T4 세 맵을 클라이언트 식별자로 묶습니다.
//! 기준은 개요 탭입니다: 개요에 없는 클라이언트의 평가는 버려집니다.
//! T0만 있거나 T4만 있는 것은 프로그램 진행 중의 정상 상태입니다.

use super::parser::KeyedRecords;
use crate::models::{Assessment, ClientOverview};
use serde::Serialize;

/// 클라이언트 한 명의 결합된 데이터
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientRecord {
    pub overview: ClientOverview,
    pub assessment_t0: Option<Assessment>,
    pub assessment_t4: Option<Assessment>,
}

/// 개요 순서를 유지하며 평가를 붙입니다.
pub fn combine_client_data(
    overview: KeyedRecords<ClientOverview>,
    t0: KeyedRecords<Assessment>,
    t4: KeyedRecords<Assessment>,
) -> Vec<ClientRecord> {
    let mut t0 = t0.into_map();
    let mut t4 = t4.into_map();

    let combined: Vec<ClientRecord> = overview
        .into_iter()
        .map(|(client_id, overview)| ClientRecord {
            assessment_t0: t0.remove(&client_id),
            assessment_t4: t4.remove(&client_id),
            overview,
        })
        .collect();

    let orphans = t0.len() + t4.len();
    if orphans > 0 {
        tracing::debug!(orphans, "Assessments without overview row were dropped");
    }
    tracing::info!("Combined data for {} clients", combined.len());

    combined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Burdens, CoachingEvaluation, SelfCare, Timepoint};
    use chrono::Utc;

    fn overview(id: &str) -> ClientOverview {
        ClientOverview {
            client_id: id.into(),
            client_name: format!("Klient {id}"),
            coach_name: "CoachA".into(),
            status: "Aktiv".into(),
            registration_date: Utc::now(),
            weeks: 1.0,
            chat_link: String::new(),
            wellbeing_t0_basic: None,
            wellbeing_t4_basic: None,
        }
    }

    fn assessment(id: &str, timepoint: Timepoint) -> Assessment {
        Assessment {
            client_id: id.into(),
            timepoint,
            submitted_at: Utc::now(),
            wellbeing: Some(5),
            burdens: Burdens::default(),
            work_area: None,
            private_area: None,
            self_care: SelfCare::default(),
            coaching: CoachingEvaluation::default(),
        }
    }

    fn keyed<T>(items: Vec<(&str, T)>) -> KeyedRecords<T> {
        let mut records = KeyedRecords::default();
        for (key, value) in items {
            records.insert(key.to_string(), value);
        }
        records
    }

    #[test]
    fn joins_on_overview_and_tolerates_asymmetry() {
        let combined = combine_client_data(
            keyed(vec![("a", overview("a")), ("b", overview("b")), ("c", overview("c"))]),
            keyed(vec![("a", assessment("a", Timepoint::T0)), ("b", assessment("b", Timepoint::T0))]),
            keyed(vec![("a", assessment("a", Timepoint::T4))]),
        );

        assert_eq!(combined.len(), 3);
        assert!(combined[0].assessment_t0.is_some() && combined[0].assessment_t4.is_some());
        assert!(combined[1].assessment_t0.is_some() && combined[1].assessment_t4.is_none());
        assert!(combined[2].assessment_t0.is_none() && combined[2].assessment_t4.is_none());
        assert_eq!(combined[2].overview.client_id, "c");
    }

    #[test]
    fn drops_assessments_without_overview() {
        let combined = combine_client_data(
            keyed(vec![("a", overview("a"))]),
            keyed(vec![("ghost", assessment("ghost", Timepoint::T0))]),
            keyed(vec![("ghost", assessment("ghost", Timepoint::T4))]),
        );

        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].overview.client_id, "a");
        assert!(combined[0].assessment_t0.is_none());
    }
}
