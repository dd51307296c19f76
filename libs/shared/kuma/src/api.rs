use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::bulk::BulkReading;
use crate::error::KumaResult;

/// Uptime percentages for one monitor, keyed by lookback window in hours.
/// A window without samples is `None`.
pub type UptimeWindows = BTreeMap<String, Option<f64>>;

/// Operations the gateway consumes from the monitoring engine session.
///
/// Implementations are shared across requests behind an `Arc` and must allow
/// concurrent calls. Each call is attempted at most once.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait KumaApi: Send + Sync {
    // Monitors
    async fn list_monitors(&self) -> KumaResult<Vec<Value>>;
    async fn get_monitor(&self, id: i64) -> KumaResult<Value>;
    async fn add_monitor(&self, config: Map<String, Value>) -> KumaResult<Value>;
    async fn edit_monitor(&self, id: i64, changes: Map<String, Value>) -> KumaResult<Value>;
    async fn delete_monitor(&self, id: i64) -> KumaResult<Value>;
    async fn pause_monitor(&self, id: i64) -> KumaResult<Value>;
    async fn resume_monitor(&self, id: i64) -> KumaResult<Value>;
    async fn get_monitor_beats(&self, id: i64, hours: u32) -> KumaResult<Vec<Value>>;
    async fn add_monitor_tag(&self, monitor_id: i64, tag_id: i64, value: String) -> KumaResult<Value>;
    async fn delete_monitor_tag(&self, monitor_id: i64, tag_id: i64, value: String) -> KumaResult<Value>;

    // Bulk readings across all monitors
    async fn avg_response_times(&self) -> KumaResult<BulkReading<f64>>;
    async fn uptimes(&self) -> KumaResult<BulkReading<UptimeWindows>>;
    async fn cert_info(&self) -> KumaResult<BulkReading<Value>>;

    // Maintenance windows
    async fn list_maintenances(&self) -> KumaResult<Vec<Value>>;
    async fn get_maintenance(&self, id: i64) -> KumaResult<Value>;
    async fn add_maintenance(&self, config: Map<String, Value>) -> KumaResult<Value>;
    async fn edit_maintenance(&self, id: i64, changes: Map<String, Value>) -> KumaResult<Value>;
    async fn delete_maintenance(&self, id: i64) -> KumaResult<Value>;
    async fn pause_maintenance(&self, id: i64) -> KumaResult<Value>;
    async fn resume_maintenance(&self, id: i64) -> KumaResult<Value>;
    async fn get_monitor_maintenance(&self, id: i64) -> KumaResult<Vec<Value>>;
    async fn add_monitor_maintenance(&self, id: i64, monitors: Vec<Value>) -> KumaResult<Value>;
    async fn get_status_page_maintenance(&self, id: i64) -> KumaResult<Vec<Value>>;
    async fn add_status_page_maintenance(&self, id: i64, status_pages: Vec<Value>) -> KumaResult<Value>;

    // Status pages
    async fn list_status_pages(&self) -> KumaResult<Vec<Value>>;
    async fn get_status_page(&self, slug: &str) -> KumaResult<Value>;
    async fn add_status_page(&self, slug: &str, title: &str) -> KumaResult<Value>;
    async fn save_status_page(&self, slug: &str, page: Map<String, Value>) -> KumaResult<Value>;
    async fn delete_status_page(&self, slug: &str) -> KumaResult<Value>;
    async fn post_incident(&self, slug: &str, incident: Map<String, Value>) -> KumaResult<Value>;
    async fn unpin_incident(&self, slug: &str) -> KumaResult<Value>;
}
