use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Uptime lookback windows (hours) always present in a snapshot.
pub const UPTIME_WINDOWS: &[&str] = &["24", "720"];

/// The ancillary reads a dashboard is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardSource {
    AvgResponseTime,
    Uptimes,
    Heartbeats,
    Cert,
}

impl fmt::Display for DashboardSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DashboardSource::AvgResponseTime => "avg_response_time",
            DashboardSource::Uptimes => "uptimes",
            DashboardSource::Heartbeats => "heartbeats",
            DashboardSource::Cert => "cert",
        };
        f.write_str(name)
    }
}

/// An ancillary read that failed outright. The field it feeds is null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceFailure {
    pub source: DashboardSource,
    pub message: String,
}

/// Per-monitor view assembled on request and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub monitor: Value,
    #[serde(rename = "avgResponseTime")]
    pub avg_response_time: Option<f64>,
    pub uptimes: BTreeMap<String, Option<f64>>,
    /// Chronological; `None` only when the heartbeat read failed.
    pub heartbeats: Option<Vec<Value>>,
    pub cert: Option<Value>,
    pub failures: Vec<SourceFailure>,
}

impl DashboardSnapshot {
    pub fn new(monitor: Value) -> Self {
        Self {
            monitor,
            avg_response_time: None,
            uptimes: UPTIME_WINDOWS
                .iter()
                .map(|window| (window.to_string(), None))
                .collect(),
            heartbeats: None,
            cert: None,
            failures: Vec::new(),
        }
    }

    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn failed(&self, source: DashboardSource) -> bool {
        self.failures.iter().any(|f| f.source == source)
    }
}
