pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{validate_maintenance, MaintenanceConfig, Schedule, Strategy, Submission};
pub use services::MaintenanceService;
