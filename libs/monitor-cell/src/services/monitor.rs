use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use shared_kuma::{translate, translate_delete, KumaApi, Target};
use shared_models::validation::as_object;
use shared_models::{AppError, NormalizedConfig};
use shared_utils::response::attach;

use crate::models::monitor_type::COMMON_FIELDS;
use crate::models::{heartbeat_window, validate_monitor, Submission, TagRequest};

pub struct MonitorService {
    kuma: Arc<dyn KumaApi>,
}

impl MonitorService {
    pub fn new(kuma: Arc<dyn KumaApi>) -> Self {
        Self { kuma }
    }

    pub async fn list_monitors(&self) -> Result<Vec<Value>, AppError> {
        self.kuma
            .list_monitors()
            .await
            .map_err(|e| translate(e, &Target::new("monitor", "*")))
    }

    pub async fn get_monitor(&self, id: i64) -> Result<Value, AppError> {
        self.kuma
            .get_monitor(id)
            .await
            .map_err(|e| translate(e, &Target::monitor(id)))
    }

    pub async fn get_beats(&self, id: i64, hours: i64) -> Result<Vec<Value>, AppError> {
        let hours = heartbeat_window("hours", hours)?;

        self.kuma
            .get_monitor_beats(id, hours)
            .await
            .map_err(|e| translate(e, &Target::monitor(id)))
    }

    /// Certificate summary for one monitor, picked out of the bulk reading.
    pub async fn get_cert(&self, id: i64) -> Result<Value, AppError> {
        let mut certs = self
            .kuma
            .cert_info()
            .await
            .map_err(|e| translate(e, &Target::monitor(id)))?;

        certs
            .take(id)
            .ok_or_else(|| AppError::not_found("certificate for monitor", id))
    }

    #[instrument(skip(self, payload))]
    pub async fn create_monitor(&self, payload: Value) -> Result<Value, AppError> {
        let normalized = validate_monitor(&payload, Submission::Create)?;
        debug!(
            monitor_type = ?normalized.get("type"),
            "Submitting monitor with {} fields",
            normalized.len()
        );

        let result = self
            .kuma
            .add_monitor(normalized.as_map().clone())
            .await
            .map_err(|e| translate(e, &Target::new("monitor", "new")))?;

        info!("Monitor created");
        Ok(attach(result, "monitor", normalized.to_value()))
    }

    #[instrument(skip(self, payload))]
    pub async fn update_monitor(&self, id: i64, payload: Value) -> Result<Value, AppError> {
        let changes = self.validate_patch(id, &payload).await?;
        if changes.is_empty() {
            return Err(AppError::invalid_field("body", "must contain at least one updatable field"));
        }

        let result = self
            .kuma
            .edit_monitor(id, changes.as_map().clone())
            .await
            .map_err(|e| translate(e, &Target::monitor(id)))?;

        info!("Monitor {} updated", id);
        Ok(attach(result, "monitor", changes.to_value()))
    }

    /// Type-agnostic checks run first so a bad patch never costs an engine
    /// call. Patches that name a type or touch type-scoped keys are then
    /// checked against the stored monitor, which also fills in keys a type
    /// switch requires but the patch leaves out.
    async fn validate_patch(&self, id: i64, payload: &Value) -> Result<NormalizedConfig, AppError> {
        let raw = as_object(payload)?;
        let changes = validate_monitor(payload, Submission::Update { current_type: None })?;

        let type_scoped = changes.keys().any(|key| !COMMON_FIELDS.contains(&key.as_str()));
        if !raw.contains_key("type") && !type_scoped {
            return Ok(changes);
        }

        let stored = self.get_monitor(id).await?;
        let stored = match stored {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Ok(validate_monitor(payload, Submission::UpdateStored { stored: &stored })?)
    }

    #[instrument(skip(self))]
    pub async fn delete_monitor(&self, id: i64) -> Result<Value, AppError> {
        translate_delete(self.kuma.delete_monitor(id).await, &Target::monitor(id))
    }

    #[instrument(skip(self))]
    pub async fn pause_monitor(&self, id: i64) -> Result<Value, AppError> {
        self.kuma
            .pause_monitor(id)
            .await
            .map_err(|e| translate(e, &Target::monitor(id)))
    }

    #[instrument(skip(self))]
    pub async fn resume_monitor(&self, id: i64) -> Result<Value, AppError> {
        self.kuma
            .resume_monitor(id)
            .await
            .map_err(|e| translate(e, &Target::monitor(id)))
    }

    #[instrument(skip(self))]
    pub async fn add_tag(&self, id: i64, tag: TagRequest) -> Result<Value, AppError> {
        self.kuma
            .add_monitor_tag(id, tag.tag_id, tag.value)
            .await
            .map_err(|e| translate(e, &Target::new("monitor or tag", id)))
    }

    #[instrument(skip(self))]
    pub async fn delete_tag(&self, id: i64, tag: TagRequest) -> Result<Value, AppError> {
        self.kuma
            .delete_monitor_tag(id, tag.tag_id, tag.value)
            .await
            .map_err(|e| translate(e, &Target::new("monitor or tag", id)))
    }
}
