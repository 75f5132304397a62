use serde::{Deserialize, Serialize};

use crate::form::profile::Profile;

/// Body of `POST {base}/recommend`. Key names are the backend's, not the form's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendRequest {
    pub age: String,
    pub ped: String,
    pub budget: String,
    pub needs: String,
    pub preferences: String,
}

impl From<&Profile> for RecommendRequest {
    fn from(profile: &Profile) -> Self {
        RecommendRequest {
            age: profile.age.clone(),
            ped: profile.pre_existing_conditions.clone(),
            budget: profile.budget_range.clone(),
            needs: profile.needs.clone(),
            preferences: profile.preferences.clone(),
        }
    }
}

/// Backend success body. `recommendations` is optional here so that its
/// absence is reported as its own failure rather than a generic parse error.
#[derive(Debug, Deserialize)]
pub(crate) struct BackendResponse {
    #[serde(default)]
    pub recommendations: Option<String>,
}

/// Outcome of one submission. There is no error variant: failures are
/// carried as `Fallback` with the fixed sample document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GatewayResult {
    Success { content: String },
    Fallback { content: String, cause: String },
}

impl GatewayResult {
    pub fn content(&self) -> &str {
        match self {
            GatewayResult::Success { content } | GatewayResult::Fallback { content, .. } => content,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GatewayResult::Success { .. })
    }
}

/// Response shape of the inbound recommend call.
/// `success = false` always comes with the fallback document and an `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub success: bool,
    pub recommendations: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl From<GatewayResult> for RecommendResponse {
    fn from(result: GatewayResult) -> Self {
        match result {
            GatewayResult::Success { content } => RecommendResponse {
                success: true,
                recommendations: content,
                error: None,
            },
            GatewayResult::Fallback { content, cause } => RecommendResponse {
                success: false,
                recommendations: content,
                error: Some(cause),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_uses_backend_key_names() {
        let body = serde_json::to_value(RecommendRequest::from(&Profile::default())).unwrap();
        assert_eq!(
            body,
            json!({
                "age": "28",
                "ped": "None",
                "budget": "15000-20000",
                "needs": "No room rent limit",
                "preferences": "Wellness rewards"
            })
        );
    }

    #[test]
    fn test_success_response_omits_error() {
        let response = RecommendResponse::from(GatewayResult::Success {
            content: "## Plan".to_string(),
        });
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({"success": true, "recommendations": "## Plan"}));
    }

    #[test]
    fn test_fallback_response_carries_error() {
        let response = RecommendResponse::from(GatewayResult::Fallback {
            content: "sample".to_string(),
            cause: "connection refused".to_string(),
        });
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("connection refused"));
        assert_eq!(response.recommendations, "sample");
    }

    #[test]
    fn test_backend_response_without_recommendations_parses_to_none() {
        let parsed: BackendResponse = serde_json::from_str(r#"{"other": 1}"#).unwrap();
        assert!(parsed.recommendations.is_none());
    }
}
