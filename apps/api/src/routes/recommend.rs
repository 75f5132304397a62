//! Stateless proxy and render endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::form::profile::Profile;
use crate::gateway::models::RecommendResponse;
use crate::render::{document::Document, render};
use crate::state::AppState;

/// Age arrives as whatever the client's number input produced.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl From<TextOrNumber> for String {
    fn from(value: TextOrNumber) -> Self {
        match value {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Number(n) => n.to_string(),
        }
    }
}

/// Inbound body, keyed like the backend. Absent fields become empty and are
/// caught by profile validation.
#[derive(Debug, Deserialize)]
pub struct RecommendForm {
    pub age: Option<TextOrNumber>,
    pub ped: Option<String>,
    pub budget: Option<String>,
    pub needs: Option<String>,
    pub preferences: Option<String>,
}

impl From<RecommendForm> for Profile {
    fn from(form: RecommendForm) -> Self {
        Profile {
            age: form.age.map(String::from).unwrap_or_default(),
            pre_existing_conditions: form.ped.unwrap_or_default(),
            budget_range: form.budget.unwrap_or_default(),
            needs: form.needs.unwrap_or_default(),
            preferences: form.preferences.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub html: String,
    pub text: String,
    pub document: Document,
}

/// POST /api/recommend
///
/// Forwards the profile to the backend. Backend failures still answer 200
/// with `success: false` and the sample document.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(form): Json<RecommendForm>,
) -> Result<Json<RecommendResponse>, AppError> {
    let profile = Profile::from(form);
    profile.validate()?;

    let submission_id = Uuid::new_v4();
    let result = state
        .gateway
        .submit(&profile)
        .instrument(info_span!("recommend", %submission_id))
        .await;

    Ok(Json(RecommendResponse::from(result)))
}

/// POST /api/render
pub async fn handle_render(Json(request): Json<RenderRequest>) -> Json<RenderResponse> {
    let document = render(&request.content);
    Json(RenderResponse {
        html: document.to_html(),
        text: document.plain_text(),
        document,
    })
}
