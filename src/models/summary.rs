use serde::Serialize;

/// 한 카테고리(지표 그룹)의 T0 → T4 변화 요약
///
/// `improved + worsened + unchanged == total`이 항상 성립합니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategorySummary {
    /// 유효한 변화율들의 산술 평균 (%)
    pub avg_change: f64,
    pub improved: usize,
    pub worsened: usize,
    pub unchanged: usize,
    pub total: usize,
}

/// 클라이언트 한 명의 네 카테고리 요약과 전체 개선도
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AssessmentSummary {
    pub wellbeing: CategorySummary,
    pub burdens: CategorySummary,
    pub life_areas: CategorySummary,
    pub self_care: CategorySummary,
    pub overall_improvement: f64,
}

/// 레이더 차트용 0–10 정규화 데이터
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RadarChartData {
    pub labels: Vec<&'static str>,
    pub t0_data: Vec<f64>,
    pub t4_data: Vec<f64>,
}
