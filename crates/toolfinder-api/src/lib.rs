//! # toolfinder-api
//!
//! HTTP surface for the toolfinder search pipeline.
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `POST /api/search` | Free-text query → matching catalogue rows |
//! | `POST /api/search/compile` | Classification → filter text and bindings |
//! | `GET /health` | Liveness plus catalogue store reachability |

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod state;

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use toolfinder_core::defaults;

pub use config::{RateLimitConfig, ServerConfig};
pub use error::ApiError;
pub use services::SearchService;
pub use state::{AppState, GlobalRateLimiter};

use middleware::{rate_limit_middleware, MakeRequestUuidV7};

/// Build the application router.
pub fn router(state: AppState, allowed_origins: Vec<HeaderValue>) -> Router {
    let api = Router::new()
        .route("/api/search", post(handlers::search_tools))
        .route("/api/search/compile", post(handlers::compile_query))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(api)
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(allowed_origins))
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .max_age(Duration::from_secs(3600)),
        )
        .layer(RequestBodyLimitLayer::new(defaults::REQUEST_BODY_LIMIT_BYTES))
        .with_state(state)
}
