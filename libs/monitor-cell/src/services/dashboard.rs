use std::sync::Arc;

use serde_json::Value;
use tracing::{error, instrument, warn};

use shared_kuma::{translate, KumaApi, KumaError, Target};
use shared_models::error::UPSTREAM_FAILURE_MESSAGE;
use shared_models::AppError;

use crate::models::{heartbeat_window, DashboardSnapshot, DashboardSource, SourceFailure};

/// Builds the per-monitor dashboard from the monitor record and four
/// ancillary engine reads.
pub struct DashboardService {
    kuma: Arc<dyn KumaApi>,
}

impl DashboardService {
    pub fn new(kuma: Arc<dyn KumaApi>) -> Self {
        Self { kuma }
    }

    /// The monitor record must resolve; each ancillary read may fail on its
    /// own and only nulls the field it feeds.
    ///
    /// The ancillary reads run concurrently on this task. Dropping the returned
    /// future abandons whichever are still in flight.
    #[instrument(skip(self))]
    pub async fn assemble(&self, id: i64, heartbeat_hours: i64) -> Result<DashboardSnapshot, AppError> {
        let heartbeat_hours = heartbeat_window("heartbeat_hours", heartbeat_hours)?;

        let monitor = self
            .kuma
            .get_monitor(id)
            .await
            .map_err(|e| translate(e, &Target::monitor(id)))?;

        let (avg, uptimes, beats, certs) = tokio::join!(
            self.kuma.avg_response_times(),
            self.kuma.uptimes(),
            self.kuma.get_monitor_beats(id, heartbeat_hours),
            self.kuma.cert_info(),
        );

        let mut snapshot = DashboardSnapshot::new(monitor);

        match avg {
            Ok(mut reading) => snapshot.avg_response_time = reading.take(id),
            Err(err) => record_failure(&mut snapshot, DashboardSource::AvgResponseTime, id, err),
        }

        match uptimes {
            Ok(mut reading) => {
                for (window, percentage) in reading.take(id).unwrap_or_default() {
                    snapshot.uptimes.insert(window, percentage);
                }
            }
            Err(err) => record_failure(&mut snapshot, DashboardSource::Uptimes, id, err),
        }

        match beats {
            Ok(mut beats) => {
                sort_chronologically(&mut beats);
                snapshot.heartbeats = Some(beats);
            }
            Err(err) => record_failure(&mut snapshot, DashboardSource::Heartbeats, id, err),
        }

        match certs {
            Ok(mut reading) => snapshot.cert = reading.take(id),
            Err(err) => record_failure(&mut snapshot, DashboardSource::Cert, id, err),
        }

        if snapshot.is_partial() {
            warn!(
                monitor_id = id,
                failed = snapshot.failures.len(),
                "Returning partial dashboard"
            );
        }

        Ok(snapshot)
    }
}

fn record_failure(snapshot: &mut DashboardSnapshot, source: DashboardSource, id: i64, err: KumaError) {
    error!(monitor_id = id, source = %source, error = %err, "Dashboard source failed");
    snapshot.failures.push(SourceFailure {
        source,
        message: UPSTREAM_FAILURE_MESSAGE.to_string(),
    });
}

/// Heartbeat timestamps are `YYYY-MM-DD HH:MM:SS[.fff]`, so text order is
/// time order.
fn sort_chronologically(beats: &mut [Value]) {
    beats.sort_by(|a, b| {
        let a = a.get("time").and_then(Value::as_str).unwrap_or_default();
        let b = b.get("time").and_then(Value::as_str).unwrap_or_default();
        a.cmp(b)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sort_chronologically() {
        let mut beats = vec![
            json!({ "time": "2024-05-01 10:02:00" }),
            json!({ "time": "2024-05-01 10:00:00" }),
            json!({ "time": "2024-05-01 10:01:00.500" }),
        ];
        sort_chronologically(&mut beats);

        let times: Vec<&str> = beats.iter().map(|b| b["time"].as_str().unwrap()).collect();
        assert_eq!(
            times,
            vec!["2024-05-01 10:00:00", "2024-05-01 10:01:00.500", "2024-05-01 10:02:00"]
        );
    }
}
