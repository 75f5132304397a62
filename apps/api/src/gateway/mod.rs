//! Recommendation Gateway — forwards a profile to the recommendation backend
//! and classifies the outcome into `Success` or `Fallback`.
//!
//! `submit` never returns an error: network failures, non-2xx statuses and
//! malformed bodies all resolve to the fixed fallback document plus a cause.
//! Exactly one request is made per call; there is no retry.

pub mod fallback;
pub mod models;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::form::profile::Profile;
use crate::gateway::fallback::fallback_content;
use crate::gateway::models::{BackendResponse, GatewayResult, RecommendRequest};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    #[error("Backend API error: {0}")]
    Status(String),

    #[error("Malformed backend response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Backend response has no recommendations")]
    MissingRecommendations,
}

impl GatewayError {
    /// Human-readable cause for the fallback result.
    pub fn cause(&self) -> String {
        cause_text(self.to_string())
    }
}

fn cause_text(message: String) -> String {
    if message.trim().is_empty() {
        "Unknown error".to_string()
    } else {
        message
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Backend seam
// ────────────────────────────────────────────────────────────────────────────

/// Where recommendation text comes from. The HTTP backend is the production
/// implementation; tests substitute their own.
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    async fn recommend(&self, request: &RecommendRequest) -> Result<String, GatewayError>;

    async fn is_reachable(&self) -> bool {
        true
    }
}

/// Calls `POST {base}/recommend` on the configured backend.
pub struct HttpRecommendationSource {
    client: Client,
    base_url: String,
}

impl HttpRecommendationSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl RecommendationSource for HttpRecommendationSource {
    async fn recommend(&self, request: &RecommendRequest) -> Result<String, GatewayError> {
        let response = self
            .client
            .post(self.url("/recommend"))
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let reason = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_u16().to_string());
            warn!(status = status.as_u16(), "Backend returned an error status");
            return Err(GatewayError::Status(reason));
        }

        let body = response.text().await?;
        let parsed: BackendResponse = serde_json::from_str(&body)?;
        parsed
            .recommendations
            .ok_or(GatewayError::MissingRecommendations)
    }

    async fn is_reachable(&self) -> bool {
        match self
            .client
            .get(self.url("/health"))
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Backend health check failed: {e}");
                false
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Gateway
// ────────────────────────────────────────────────────────────────────────────

/// Stateless across calls; cloning shares the underlying source.
#[derive(Clone)]
pub struct Gateway {
    source: Arc<dyn RecommendationSource>,
}

impl Gateway {
    pub fn new(config: &Config) -> Result<Self> {
        let source = HttpRecommendationSource::new(config.recommender_url.clone())?;
        Ok(Self::with_source(Arc::new(source)))
    }

    pub fn with_source(source: Arc<dyn RecommendationSource>) -> Self {
        Self { source }
    }

    pub async fn submit(&self, profile: &Profile) -> GatewayResult {
        let request = RecommendRequest::from(profile);

        match self.source.recommend(&request).await {
            Ok(content) => {
                info!(content_len = content.len(), "Recommendations received");
                GatewayResult::Success { content }
            }
            Err(e) => {
                let cause = e.cause();
                warn!(%cause, "Recommendation backend unavailable, serving sample data");
                GatewayResult::Fallback {
                    content: fallback_content(),
                    cause,
                }
            }
        }
    }

    pub async fn backend_health(&self) -> bool {
        self.source.is_reachable().await
    }
}
