pub mod builder;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use builder::{AuthMethod, BuildError, MonitorConfigBuilder};
pub use models::{validate_monitor, DashboardSnapshot, MonitorConfig, MonitorType, Submission};
pub use services::{DashboardService, MonitorService};
