//! # 미들웨어
//!
//! - `rate_limit`: 호출자 IP별 수동 동기화 횟수 제한

pub mod rate_limit;

pub use rate_limit::{ClientIp, RateLimiter};
