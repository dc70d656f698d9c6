//! Global request rate limiting.
//!
//! Every search costs a classifier call, so the limiter guards the `/api`
//! routes only; `/health` stays reachable for health checks.

use std::num::NonZeroU32;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use governor::{Quota, RateLimiter};

use crate::config::RateLimitConfig;
use crate::state::{AppState, GlobalRateLimiter};

/// Build the limiter for a config, or `None` when limiting is disabled.
pub fn build_rate_limiter(config: Option<RateLimitConfig>) -> Option<Arc<GlobalRateLimiter>> {
    let config = config?;
    let burst = NonZeroU32::new(config.requests)?;
    let quota = Quota::with_period(config.period / config.requests)?.allow_burst(burst);
    Some(Arc::new(RateLimiter::direct(quota)))
}

pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(limiter) = &state.rate_limiter {
        if limiter.check().is_err() {
            tracing::warn!(subsystem = "api", path = %request.uri().path(), "Rate limit exceeded");
            return (
                StatusCode::TOO_MANY_REQUESTS,
                Json(serde_json::json!({
                    "error": "rate_limit_exceeded",
                    "message": "Too many requests. Please wait before retrying."
                })),
            )
                .into_response();
        }
    }
    next.run(request).await
}
