//! # 비즈니스 로직 서비스
//!
//! - `categories`: 범주형 응답 → 순위
//! - `changes`: T0 → T4 변화율과 추세
//! - `comparison`: 상세 화면의 지표별 비교표
//! - `summary`: 카테고리 요약과 전체 개선도
//! - `radar`: 레이더 차트 정규화
//! - `sheets`: 스프레드시트 수집, 파싱, 결합
//! - `sync`: 저장소 전체 교체 동기화

pub mod categories;
pub mod changes;
pub mod comparison;
pub mod radar;
pub mod sheets;
pub mod summary;
pub mod sync;
