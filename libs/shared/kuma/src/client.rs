use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use shared_config::AppConfig;

use crate::api::{KumaApi, UptimeWindows};
use crate::bulk::BulkReading;
use crate::error::{KumaError, KumaResult};

/// Client for the HTTP event bridge in front of the monitoring engine.
///
/// Each engine event is one `POST {base}/events/{event}` carrying a JSON
/// argument object. The bridge answers with `{"ok": bool, "msg": ..., ...}`;
/// reads put their payload under `data`.
pub struct KumaClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
    token: RwLock<Option<String>>,
}

impl KumaClient {
    pub fn new(config: &AppConfig) -> KumaResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.kuma_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.kuma_url.trim_end_matches('/').to_string(),
            username: config.kuma_username.clone(),
            password: config.kuma_password.clone(),
            token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn session_token(&self) -> KumaResult<Option<String>> {
        if self.username.is_empty() {
            return Ok(None);
        }

        if let Some(token) = self.token.read().await.clone() {
            return Ok(Some(token));
        }

        let mut envelope = self
            .post(
                "/login",
                json!({ "username": self.username, "password": self.password }),
                None,
            )
            .await?;

        let token = match envelope.remove("token") {
            Some(Value::String(token)) => token,
            _ => return Err(KumaError::Decode("login response carried no token".to_string())),
        };

        info!("Established engine session for {}", self.username);
        *self.token.write().await = Some(token.clone());
        Ok(Some(token))
    }

    async fn post(&self, path: &str, args: Value, token: Option<&str>) -> KumaResult<Map<String, Value>> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Calling engine at {}", url);

        let mut req = self.client.post(&url).json(&args);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }

        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            error!("Engine error ({}): {}", status, text);
            let message = envelope_message(&text).unwrap_or(text);

            return Err(match status.as_u16() {
                404 => KumaError::NotFound(message),
                400 | 422 => KumaError::InvalidArgument(message),
                401 | 403 => {
                    // Force a fresh login on the next call.
                    *self.token.write().await = None;
                    KumaError::Failure(format!("session rejected: {}", message))
                }
                _ => KumaError::Failure(format!("{}: {}", status, message)),
            });
        }

        let mut envelope = match serde_json::from_str::<Value>(&text)? {
            Value::Object(map) => map,
            _ => return Err(KumaError::Decode("expected a JSON object".to_string())),
        };

        match envelope.remove("ok") {
            Some(Value::Bool(true)) => Ok(envelope),
            Some(Value::Bool(false)) => {
                let message = envelope
                    .get("msg")
                    .and_then(Value::as_str)
                    .unwrap_or("no message")
                    .to_string();
                Err(classify_message(message))
            }
            _ => Err(KumaError::Decode("response carried no ok flag".to_string())),
        }
    }

    async fn emit(&self, event: &str, args: Value) -> KumaResult<Map<String, Value>> {
        let token = self.session_token().await?;
        self.post(&format!("/events/{}", event), args, token.as_deref())
            .await
    }

    async fn emit_value(&self, event: &str, args: Value) -> KumaResult<Value> {
        Ok(Value::Object(self.emit(event, args).await?))
    }

    async fn emit_data<T: DeserializeOwned>(&self, event: &str, args: Value) -> KumaResult<T> {
        let mut envelope = self.emit(event, args).await?;
        let data = envelope
            .remove("data")
            .ok_or_else(|| KumaError::Decode(format!("{} response carried no data", event)))?;
        Ok(serde_json::from_value(data)?)
    }
}

fn envelope_message(text: &str) -> Option<String> {
    serde_json::from_str::<Value>(text)
        .ok()?
        .get("msg")?
        .as_str()
        .map(str::to_string)
}

/// `ok: false` envelopes only carry a message; a missing entity is the one
/// outcome callers need to tell apart.
fn classify_message(message: String) -> KumaError {
    let lowered = message.to_lowercase();
    if lowered.contains("not found") || lowered.contains("does not exist") {
        KumaError::NotFound(message)
    } else {
        KumaError::Failure(message)
    }
}

#[async_trait]
impl KumaApi for KumaClient {
    async fn list_monitors(&self) -> KumaResult<Vec<Value>> {
        self.emit_data("getMonitorList", json!({})).await
    }

    async fn get_monitor(&self, id: i64) -> KumaResult<Value> {
        self.emit_data("getMonitor", json!({ "id": id })).await
    }

    async fn add_monitor(&self, config: Map<String, Value>) -> KumaResult<Value> {
        self.emit_value("add", Value::Object(config)).await
    }

    async fn edit_monitor(&self, id: i64, changes: Map<String, Value>) -> KumaResult<Value> {
        self.emit_value("editMonitor", json!({ "id": id, "changes": changes }))
            .await
    }

    async fn delete_monitor(&self, id: i64) -> KumaResult<Value> {
        self.emit_value("deleteMonitor", json!({ "id": id })).await
    }

    async fn pause_monitor(&self, id: i64) -> KumaResult<Value> {
        self.emit_value("pauseMonitor", json!({ "id": id })).await
    }

    async fn resume_monitor(&self, id: i64) -> KumaResult<Value> {
        self.emit_value("resumeMonitor", json!({ "id": id })).await
    }

    async fn get_monitor_beats(&self, id: i64, hours: u32) -> KumaResult<Vec<Value>> {
        self.emit_data("getMonitorBeats", json!({ "id": id, "period": hours }))
            .await
    }

    async fn add_monitor_tag(&self, monitor_id: i64, tag_id: i64, value: String) -> KumaResult<Value> {
        self.emit_value(
            "addMonitorTag",
            json!({ "tagID": tag_id, "monitorID": monitor_id, "value": value }),
        )
        .await
    }

    async fn delete_monitor_tag(&self, monitor_id: i64, tag_id: i64, value: String) -> KumaResult<Value> {
        self.emit_value(
            "deleteMonitorTag",
            json!({ "tagID": tag_id, "monitorID": monitor_id, "value": value }),
        )
        .await
    }

    async fn avg_response_times(&self) -> KumaResult<BulkReading<f64>> {
        self.emit_data("avgPing", json!({})).await
    }

    async fn uptimes(&self) -> KumaResult<BulkReading<UptimeWindows>> {
        self.emit_data("uptime", json!({})).await
    }

    async fn cert_info(&self) -> KumaResult<BulkReading<Value>> {
        self.emit_data("certInfo", json!({})).await
    }

    async fn list_maintenances(&self) -> KumaResult<Vec<Value>> {
        self.emit_data("getMaintenanceList", json!({})).await
    }

    async fn get_maintenance(&self, id: i64) -> KumaResult<Value> {
        self.emit_data("getMaintenance", json!({ "id": id })).await
    }

    async fn add_maintenance(&self, config: Map<String, Value>) -> KumaResult<Value> {
        self.emit_value("addMaintenance", Value::Object(config)).await
    }

    async fn edit_maintenance(&self, id: i64, changes: Map<String, Value>) -> KumaResult<Value> {
        self.emit_value("editMaintenance", json!({ "id": id, "changes": changes }))
            .await
    }

    async fn delete_maintenance(&self, id: i64) -> KumaResult<Value> {
        self.emit_value("deleteMaintenance", json!({ "id": id })).await
    }

    async fn pause_maintenance(&self, id: i64) -> KumaResult<Value> {
        self.emit_value("pauseMaintenance", json!({ "id": id })).await
    }

    async fn resume_maintenance(&self, id: i64) -> KumaResult<Value> {
        self.emit_value("resumeMaintenance", json!({ "id": id })).await
    }

    async fn get_monitor_maintenance(&self, id: i64) -> KumaResult<Vec<Value>> {
        self.emit_data("getMonitorMaintenance", json!({ "id": id })).await
    }

    async fn add_monitor_maintenance(&self, id: i64, monitors: Vec<Value>) -> KumaResult<Value> {
        self.emit_value("addMonitorMaintenance", json!({ "id": id, "monitors": monitors }))
            .await
    }

    async fn get_status_page_maintenance(&self, id: i64) -> KumaResult<Vec<Value>> {
        self.emit_data("getMaintenanceStatusPage", json!({ "id": id }))
            .await
    }

    async fn add_status_page_maintenance(&self, id: i64, status_pages: Vec<Value>) -> KumaResult<Value> {
        self.emit_value(
            "addMaintenanceStatusPage",
            json!({ "id": id, "statusPages": status_pages }),
        )
        .await
    }

    async fn list_status_pages(&self) -> KumaResult<Vec<Value>> {
        self.emit_data("getStatusPageList", json!({})).await
    }

    async fn get_status_page(&self, slug: &str) -> KumaResult<Value> {
        self.emit_data("getStatusPage", json!({ "slug": slug })).await
    }

    async fn add_status_page(&self, slug: &str, title: &str) -> KumaResult<Value> {
        self.emit_value("addStatusPage", json!({ "slug": slug, "title": title }))
            .await
    }

    async fn save_status_page(&self, slug: &str, page: Map<String, Value>) -> KumaResult<Value> {
        self.emit_value("saveStatusPage", json!({ "slug": slug, "config": page }))
            .await
    }

    async fn delete_status_page(&self, slug: &str) -> KumaResult<Value> {
        self.emit_value("deleteStatusPage", json!({ "slug": slug })).await
    }

    async fn post_incident(&self, slug: &str, incident: Map<String, Value>) -> KumaResult<Value> {
        self.emit_value("postIncident", json!({ "slug": slug, "incident": incident }))
            .await
    }

    async fn unpin_incident(&self, slug: &str) -> KumaResult<Value> {
        self.emit_value("unpinIncident", json!({ "slug": slug })).await
    }
}
