use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Service status plus a one-shot check of the recommendation backend.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let backend = if state.gateway.backend_health().await {
        "reachable"
    } else {
        "unreachable"
    };

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "backend": backend,
        "backend_url": state.config.recommender_url,
    }))
}
