//! Liveness and store reachability.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::warn;

use crate::state::AppState;

/// `200` with `database: "ok"`, or `503` with `status: "degraded"` when the
/// catalogue store cannot be reached.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let (status, health, database) = match state.search.ping_store().await {
        Ok(()) => (StatusCode::OK, "healthy", "ok"),
        Err(e) => {
            warn!(subsystem = "api", op = "health", error = %e, "Catalogue store unreachable");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unavailable")
        }
    };

    (
        status,
        Json(serde_json::json!({
            "status": health,
            "version": env!("CARGO_PKG_VERSION"),
            "database": database,
        })),
    )
}
