pub mod maintenance;

pub use maintenance::MaintenanceService;
