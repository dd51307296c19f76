use std::sync::Arc;

use axum::extract::FromRef;

use shared_config::AppConfig;
use shared_kuma::KumaApi;

/// Router state shared by every cell: configuration plus the one long-lived
/// engine session handle.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub kuma: Arc<dyn KumaApi>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, kuma: Arc<dyn KumaApi>) -> Self {
        Self { config, kuma }
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
