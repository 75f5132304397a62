use std::sync::Arc;

use crate::config::Config;
use crate::form::profile::Profile;
use crate::form::session::FormSession;
use crate::gateway::Gateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub gateway: Gateway,
    /// The single form session behind the `/api/form` endpoints.
    pub form: Arc<FormSession>,
}

impl AppState {
    pub fn new(config: Config, gateway: Gateway) -> Self {
        Self {
            config,
            gateway,
            form: Arc::new(FormSession::new(Profile::default())),
        }
    }
}
