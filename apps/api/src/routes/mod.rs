pub mod form;
pub mod health;
pub mod recommend;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Stateless proxy + rendering
        .route("/api/recommend", post(recommend::handle_recommend))
        .route("/api/render", post(recommend::handle_render))
        // Form session
        .route("/api/form", get(form::handle_get_form))
        .route("/api/form/chips", get(form::handle_chips))
        .route("/api/form/fields/:field", put(form::handle_update_field))
        .route(
            "/api/form/fields/:field/tokens",
            post(form::handle_append_token),
        )
        .route("/api/form/submit", post(form::handle_submit))
        .route("/api/form/result", get(form::handle_latest_result))
        .with_state(state)
}
