pub mod config;
pub mod strategy;

use serde::{Deserialize, Serialize};

pub use config::{
    validate_maintenance, MaintenanceConfig, MaintenanceSettings, MonthDay, Schedule, Submission,
    TimeOfDay, DEFAULT_TIME_RANGE,
};
pub use strategy::{Strategy, UnknownStrategy};

/// A monitor attached to a maintenance window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorRef {
    pub id: i64,
    pub name: String,
}

/// A status page a maintenance window is announced on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusPageRef {
    pub id: i64,
    pub title: String,
}
