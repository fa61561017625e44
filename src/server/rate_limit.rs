//! Per-source fixed-window rate limiting for the inquiry endpoint.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use super::routes::ApiResponse;
use crate::config::RateLimitConfig;

pub const RATE_LIMITED_MESSAGE: &str = "Too many requests from this IP, please try again later.";

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Counts requests per client address within fixed windows.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    windows: Mutex<HashMap<IpAddr, Window>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            windows: Mutex::new(HashMap::new()),
        })
    }

    /// Record a request from `ip`. Returns `false` if it is over the limit.
    pub fn check(&self, ip: IpAddr) -> bool {
        self.check_at(ip, Instant::now())
    }

    fn check_at(&self, ip: IpAddr, now: Instant) -> bool {
        let window_len = self.config.window;
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());

        windows.retain(|_, w| now.saturating_duration_since(w.started) < window_len);

        let window = windows.entry(ip).or_insert(Window {
            started: now,
            count: 0,
        });
        if window.count >= self.config.max_requests {
            return false;
        }
        window.count += 1;
        true
    }

    /// Time left until `ip` may send again, if it is currently limited.
    pub fn retry_after(&self, ip: IpAddr) -> Option<Duration> {
        let windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());
        let window = windows.get(&ip)?;
        (window.count >= self.config.max_requests)
            .then(|| self.config.window.saturating_sub(window.started.elapsed()))
    }

    /// Pick the address a request is counted against.
    fn client_ip(&self, request: &Request) -> IpAddr {
        let forwarded = self
            .config
            .trust_forwarded_for
            .then(|| {
                request
                    .headers()
                    .get("x-forwarded-for")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.split(',').next())
                    .and_then(|v| v.trim().parse::<IpAddr>().ok())
            })
            .flatten();

        forwarded
            .or_else(|| {
                request
                    .extensions()
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip())
            })
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
    }
}

/// Middleware: reject with 429 once a client exceeds its window.
pub async fn limit_by_ip(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let ip = limiter.client_ip(&request);

    if !limiter.check(ip) {
        let retry_after = limiter.retry_after(ip).unwrap_or_default();
        warn!(%ip, retry_after_secs = retry_after.as_secs(), "Inquiry rate limit exceeded");
        let mut response =
            ApiResponse::failure(StatusCode::TOO_MANY_REQUESTS, RATE_LIMITED_MESSAGE).into_response();
        response
            .headers_mut()
            .insert(RETRY_AFTER, HeaderValue::from(retry_after.as_secs()));
        return response;
    }

    next.run(request).await
}
