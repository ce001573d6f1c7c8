//! # 레이트 리밋
//!
//! 수동 동기화(`POST /api/v1/sync`)는 무거운 작업이므로 호출자 IP별로
//! 고정 기간 안의 호출 횟수를 제한합니다.
//!
//! 상태는 프로세스 메모리에만 있으며, 만료된 항목은 백그라운드 정리 작업이 지웁니다.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    reset_at: Instant,
}

/// 한 번의 검사 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub limited: bool,
    pub limit: u32,
    pub remaining: u32,
    /// 현재 기간이 끝날 때까지 남은 시간
    pub reset_after: Duration,
}

impl RateLimitDecision {
    /// `Retry-After` 헤더 값 (올림한 초, 최소 1)
    pub fn retry_after_secs(&self) -> u64 {
        let secs = self.reset_after.as_secs();
        let secs = if self.reset_after.subsec_nanos() > 0 { secs + 1 } else { secs };
        secs.max(1)
    }
}

pub struct RateLimiter {
    limit: u32,
    window: Duration,
    entries: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn check(&self, key: &str) -> RateLimitDecision {
        self.check_at(key, Instant::now())
    }

    /// `now` 시점 기준으로 호출 한 번을 기록하고 허용 여부를 판단합니다.
    ///
    /// 기간이 없거나 지났으면 새 기간을 시작합니다. 제한된 호출도 횟수에 포함됩니다.
    pub fn check_at(&self, key: &str, now: Instant) -> RateLimitDecision {
        let mut entries = self.lock_entries();

        let window = entries
            .entry(key.to_string())
            .and_modify(|w| {
                if now > w.reset_at {
                    *w = Window {
                        count: 0,
                        reset_at: now + self.window,
                    };
                }
            })
            .or_insert(Window {
                count: 0,
                reset_at: now + self.window,
            });
        window.count = window.count.saturating_add(1);

        let limited = window.count > self.limit;
        RateLimitDecision {
            limited,
            limit: self.limit,
            remaining: if limited { 0 } else { self.limit - window.count },
            reset_after: window.reset_at.saturating_duration_since(now),
        }
    }

    /// 만료된 기간을 지우고 지운 개수를 돌려줍니다.
    pub fn cleanup_expired(&self, now: Instant) -> usize {
        let mut entries = self.lock_entries();
        let before = entries.len();
        entries.retain(|_, w| now <= w.reset_at);
        before - entries.len()
    }

    pub fn clear(&self) {
        self.lock_entries().clear();
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, Window>> {
        // 잠금 중 패닉이 나도 카운터 맵 자체는 일관된 상태입니다.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 주기적으로 만료 항목을 지우는 작업을 띄웁니다. `cancel` 시 맵을 비우고 끝납니다.
    pub fn spawn_cleanup(self: Arc<Self>, every: Duration, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        self.clear();
                        break;
                    }
                    _ = ticker.tick() => {
                        let removed = self.cleanup_expired(Instant::now());
                        if removed > 0 {
                            tracing::debug!(removed, "Expired rate limit windows removed");
                        }
                    }
                }
            }
        })
    }
}

/// 호출자 IP: `x-forwarded-for`의 첫 값, 없으면 `x-real-ip`, 둘 다 없으면 "unknown"
pub fn client_ip(headers: &HeaderMap) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    if let Some(forwarded) = header("x-forwarded-for") {
        if let Some(first) = forwarded.split(',').next() {
            return first.trim().to_string();
        }
    }
    header("x-real-ip").unwrap_or("unknown").to_string()
}

/// 요청 헤더에서 뽑아낸 호출자 IP 추출자
#[derive(Debug, Clone)]
pub struct ClientIp(pub String);

impl<S: Send + Sync> FromRequestParts<S> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ClientIp(client_ip(&parts.headers)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn allows_up_to_limit_then_blocks() {
        let limiter = RateLimiter::new(3, HOUR);
        let now = Instant::now();

        let remaining: Vec<u32> = (0..3).map(|_| limiter.check_at("ip", now).remaining).collect();
        assert_eq!(remaining, vec![2, 1, 0]);

        let fourth = limiter.check_at("ip", now + Duration::from_secs(10));
        assert!(fourth.limited);
        assert_eq!(fourth.remaining, 0);
        assert_eq!(fourth.reset_after, HOUR - Duration::from_secs(10));
        assert_eq!(fourth.retry_after_secs(), 3590);
    }

    #[test]
    fn keys_are_independent() {
        let limiter = RateLimiter::new(1, HOUR);
        let now = Instant::now();
        assert!(!limiter.check_at("a", now).limited);
        assert!(limiter.check_at("a", now).limited);
        assert!(!limiter.check_at("b", now).limited);
    }

    #[test]
    fn window_resets_after_expiry() {
        let limiter = RateLimiter::new(1, HOUR);
        let now = Instant::now();
        limiter.check_at("ip", now);
        assert!(limiter.check_at("ip", now).limited);

        let later = now + HOUR + Duration::from_secs(1);
        let decision = limiter.check_at("ip", later);
        assert!(!decision.limited);
        assert_eq!(decision.reset_after, HOUR);
    }

    #[test]
    fn cleanup_removes_only_expired_windows() {
        let limiter = RateLimiter::new(3, HOUR);
        let now = Instant::now();
        limiter.check_at("old", now);
        limiter.check_at("new", now + Duration::from_secs(1800));

        assert_eq!(limiter.cleanup_expired(now + HOUR + Duration::from_secs(1)), 1);
        assert_eq!(limiter.check_at("new", now + Duration::from_secs(1800)).remaining, 1);
    }

    #[test]
    fn client_ip_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        assert_eq!(client_ip(&headers), "unknown");

        headers.insert("x-real-ip", HeaderValue::from_static(" 10.0.0.2 "));
        assert_eq!(client_ip(&headers), "10.0.0.2");

        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7, 10.0.0.1"));
        assert_eq!(client_ip(&headers), "203.0.113.7");
    }
}
