//! Endpoints over the shared form session.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::form::chips::{catalog, ChipGroup};
use crate::form::profile::{Field, Profile};
use crate::form::session::SubmissionRecord;
use crate::gateway::models::RecommendResponse;
use crate::render::render_html;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FieldValue {
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct FormView {
    #[serde(flatten)]
    pub profile: Profile,
    /// True while a submit is in flight; the submit button should be disabled.
    pub submitting: bool,
}

#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub submission_id: Uuid,
    pub completed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub response: RecommendResponse,
    pub html: String,
}

impl From<SubmissionRecord> for SubmissionResponse {
    fn from(record: SubmissionRecord) -> Self {
        let html = render_html(record.result.content());
        SubmissionResponse {
            submission_id: record.submission_id,
            completed_at: record.completed_at,
            response: RecommendResponse::from(record.result),
            html,
        }
    }
}

/// GET /api/form
pub async fn handle_get_form(State(state): State<AppState>) -> Json<FormView> {
    Json(FormView {
        profile: state.form.current().await,
        submitting: state.form.is_busy(),
    })
}

/// PUT /api/form/fields/:field
pub async fn handle_update_field(
    State(state): State<AppState>,
    Path(field): Path<String>,
    Json(request): Json<FieldValue>,
) -> Result<Json<Profile>, AppError> {
    let field: Field = field.parse()?;
    Ok(Json(state.form.update(field, request.value).await))
}

/// POST /api/form/fields/:field/tokens
pub async fn handle_append_token(
    State(state): State<AppState>,
    Path(field): Path<String>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<Profile>, AppError> {
    let field: Field = field.parse()?;
    Ok(Json(state.form.append_token(field, &request.token).await?))
}

/// GET /api/form/chips
pub async fn handle_chips() -> Json<Vec<ChipGroup>> {
    Json(catalog())
}

/// POST /api/form/submit
///
/// 409 while a previous submit is still in flight; that request never
/// reaches the backend.
pub async fn handle_submit(
    State(state): State<AppState>,
) -> Result<Json<SubmissionResponse>, AppError> {
    let record = state.form.submit(&state.gateway).await?;
    Ok(Json(SubmissionResponse::from(record)))
}

/// GET /api/form/result
pub async fn handle_latest_result(
    State(state): State<AppState>,
) -> Result<Json<SubmissionResponse>, AppError> {
    let record = state
        .form
        .latest()
        .await
        .ok_or_else(|| AppError::NotFound("No submission yet".to_string()))?;
    Ok(Json(SubmissionResponse::from(record)))
}
