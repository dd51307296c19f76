pub mod dashboard;
pub mod monitor;

pub use dashboard::DashboardService;
pub use monitor::MonitorService;
