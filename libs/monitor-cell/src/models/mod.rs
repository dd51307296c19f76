pub mod config;
pub mod dashboard;
pub mod monitor_type;
pub mod probe;

use serde::Deserialize;

use shared_models::ValidationError;

pub use config::{validate_monitor, CommonSettings, MonitorConfig, Submission};
pub use dashboard::{DashboardSnapshot, DashboardSource, SourceFailure, UPTIME_WINDOWS};
pub use monitor_type::{MonitorType, UnknownMonitorType};
pub use probe::{HttpAuth, HttpRequest, Probe};

fn default_hours() -> i64 {
    1
}

/// Heartbeat look-back windows are whole hours, at least one.
pub fn heartbeat_window(field: &str, hours: i64) -> Result<u32, ValidationError> {
    u32::try_from(hours)
        .ok()
        .filter(|hours| *hours >= 1)
        .ok_or_else(|| ValidationError::single(field, "must be a whole number of hours, at least 1"))
}

#[derive(Debug, Deserialize)]
pub struct BeatsQuery {
    #[serde(default = "default_hours")]
    pub hours: i64,
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    #[serde(default = "default_hours")]
    pub heartbeat_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagRequest {
    pub tag_id: i64,
    #[serde(default)]
    pub value: String,
}
