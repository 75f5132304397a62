use anyhow::{Context, Result};

/// Base URL of the recommendation backend when `RECOMMENDER_URL` is unset.
pub const DEFAULT_RECOMMENDER_URL: &str = "http://localhost:8000";

/// Application configuration loaded from environment variables.
/// Every value has a default so the service starts with an empty environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL without a trailing slash; `/recommend` is appended per call.
    pub recommender_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            recommender_url: normalize_base_url(
                &std::env::var("RECOMMENDER_URL")
                    .unwrap_or_else(|_| DEFAULT_RECOMMENDER_URL.to_string()),
            ),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Configuration pointing at an explicit backend, ignoring the environment.
    #[cfg(test)]
    pub fn with_recommender_url(url: &str) -> Self {
        Config {
            recommender_url: normalize_base_url(url),
            port: 3000,
            rust_log: "info".to_string(),
        }
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = Config::with_recommender_url("http://localhost:8000/");
        assert_eq!(config.recommender_url, "http://localhost:8000");
    }

    #[test]
    fn test_default_url_is_localhost() {
        assert_eq!(
            normalize_base_url(DEFAULT_RECOMMENDER_URL),
            "http://localhost:8000"
        );
    }
}
