use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::utils::client::client_ip;

const WINDOW: Duration = Duration::from_secs(1);
const PURGE_AFTER: usize = 4096;

#[derive(Debug, Clone, Copy)]
struct WindowState {
    start: Instant,
    count: u32,
}

/// Fixed one-second window per client address. Requests without a
/// resolvable address share one bucket.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    rps: u32,
    trust_proxy_headers: bool,
    windows: Arc<Mutex<HashMap<Option<IpAddr>, WindowState>>>,
}

impl RateLimiter {
    fn new(rps: u32, trust_proxy_headers: bool) -> Self {
        Self {
            rps: rps.max(1),
            trust_proxy_headers,
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn allow(&self, client: Option<IpAddr>) -> bool {
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let now = Instant::now();

        if windows.len() > PURGE_AFTER {
            windows.retain(|_, w| now.duration_since(w.start) < WINDOW);
        }

        let window = windows.entry(client).or_insert(WindowState {
            start: now,
            count: 0,
        });
        if now.duration_since(window.start) >= WINDOW {
            window.start = now;
            window.count = 0;
        }
        if window.count < self.rps {
            window.count += 1;
            true
        } else {
            false
        }
    }
}

pub async fn rps_middleware(
    State(state): State<RateLimiter>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let client = client_ip(req.headers(), req.extensions(), state.trust_proxy_headers);
    if !state.allow(client) {
        tracing::debug!(client = ?client, "rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": "rate_limit_exceeded" })),
        )
            .into_response();
    }
    next.run(req).await
}

pub fn new_rps_state(rps: u32, trust_proxy_headers: bool) -> RateLimiter {
    RateLimiter::new(rps, trust_proxy_headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_client_gets_its_own_budget() {
        let limiter = new_rps_state(2, false);
        let a: Option<IpAddr> = Some("10.0.0.1".parse().unwrap());
        let b: Option<IpAddr> = Some("10.0.0.2".parse().unwrap());
        assert!(limiter.allow(a));
        assert!(limiter.allow(a));
        assert!(!limiter.allow(a));
        assert!(limiter.allow(b));
        assert!(limiter.allow(None));
    }
}
