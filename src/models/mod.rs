//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `assessment`: T0/T4 평가와 필드 그룹
//! - `client`: 클라이언트 개요
//! - `summary`: 비교 요약, 레이더 차트 데이터 (파생값, 저장하지 않음)
//! - `sync`: 동기화 결과
//!
//! `pub use X::*;`로 재공개하여 `crate::models::Assessment`처럼 짧게 접근합니다.

pub mod assessment;
pub mod client;
pub mod summary;
pub mod sync;

pub use assessment::*;
pub use client::*;
pub use summary::*;
pub use sync::*;
