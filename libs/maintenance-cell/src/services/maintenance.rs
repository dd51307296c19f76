use std::sync::Arc;

use chrono::Local;
use serde_json::{json, Map, Value};
use tracing::{debug, info, instrument};

use shared_kuma::{translate, translate_delete, KumaApi, Target};
use shared_models::validation::as_object;
use shared_models::{AppError, NormalizedConfig};
use shared_utils::response::attach;

use crate::models::strategy::COMMON_FIELDS;
use crate::models::{validate_maintenance, MonitorRef, StatusPageRef, Submission};

pub struct MaintenanceService {
    kuma: Arc<dyn KumaApi>,
}

impl MaintenanceService {
    pub fn new(kuma: Arc<dyn KumaApi>) -> Self {
        Self { kuma }
    }

    pub async fn list_maintenances(&self) -> Result<Vec<Value>, AppError> {
        self.kuma
            .list_maintenances()
            .await
            .map_err(|e| translate(e, &Target::new("maintenance", "*")))
    }

    pub async fn get_maintenance(&self, id: i64) -> Result<Value, AppError> {
        self.kuma
            .get_maintenance(id)
            .await
            .map_err(|e| translate(e, &Target::maintenance(id)))
    }

    #[instrument(skip(self, payload))]
    pub async fn create_maintenance(&self, payload: Value) -> Result<Value, AppError> {
        let today = Local::now().date_naive();
        let normalized = validate_maintenance(&payload, Submission::Create, today)?;
        debug!(strategy = ?normalized.get("strategy"), "Submitting maintenance window");

        let result = self
            .kuma
            .add_maintenance(normalized.as_map().clone())
            .await
            .map_err(|e| translate(e, &Target::new("maintenance", "new")))?;

        info!("Maintenance window created");
        Ok(attach(result, "maintenance", normalized.to_value()))
    }

    #[instrument(skip(self, payload))]
    pub async fn update_maintenance(&self, id: i64, payload: Value) -> Result<Value, AppError> {
        let changes = self.validate_patch(id, &payload).await?;
        if changes.is_empty() {
            return Err(AppError::invalid_field("body", "must contain at least one updatable field"));
        }

        let result = self
            .kuma
            .edit_maintenance(id, changes.as_map().clone())
            .await
            .map_err(|e| translate(e, &Target::maintenance(id)))?;

        info!("Maintenance window {} updated", id);
        Ok(attach(result, "maintenance", changes.to_value()))
    }

    async fn validate_patch(&self, id: i64, payload: &Value) -> Result<NormalizedConfig, AppError> {
        let today = Local::now().date_naive();
        let raw = as_object(payload)?;
        let changes = validate_maintenance(payload, Submission::Update { current_strategy: None }, today)?;

        let strategy_scoped = changes.keys().any(|key| !COMMON_FIELDS.contains(&key.as_str()));
        if !raw.contains_key("strategy") && !strategy_scoped {
            return Ok(changes);
        }

        // The stored window decides the scope and backs a strategy switch.
        let stored = match self.get_maintenance(id).await? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Ok(validate_maintenance(
            payload,
            Submission::UpdateStored { stored: &stored },
            today,
        )?)
    }

    #[instrument(skip(self))]
    pub async fn delete_maintenance(&self, id: i64) -> Result<Value, AppError> {
        translate_delete(self.kuma.delete_maintenance(id).await, &Target::maintenance(id))
    }

    #[instrument(skip(self))]
    pub async fn pause_maintenance(&self, id: i64) -> Result<Value, AppError> {
        self.kuma
            .pause_maintenance(id)
            .await
            .map_err(|e| translate(e, &Target::maintenance(id)))
    }

    #[instrument(skip(self))]
    pub async fn resume_maintenance(&self, id: i64) -> Result<Value, AppError> {
        self.kuma
            .resume_maintenance(id)
            .await
            .map_err(|e| translate(e, &Target::maintenance(id)))
    }

    pub async fn get_monitors(&self, id: i64) -> Result<Vec<Value>, AppError> {
        self.kuma
            .get_monitor_maintenance(id)
            .await
            .map_err(|e| translate(e, &Target::maintenance(id)))
    }

    /// Replaces the window's monitor associations.
    #[instrument(skip(self, monitors), fields(count = monitors.len()))]
    pub async fn add_monitors(&self, id: i64, monitors: Vec<MonitorRef>) -> Result<Value, AppError> {
        let monitors = monitors
            .into_iter()
            .map(|m| json!({ "id": m.id, "name": m.name }))
            .collect();

        self.kuma
            .add_monitor_maintenance(id, monitors)
            .await
            .map_err(|e| translate(e, &Target::new("maintenance or monitors", id)))
    }

    pub async fn get_status_pages(&self, id: i64) -> Result<Vec<Value>, AppError> {
        self.kuma
            .get_status_page_maintenance(id)
            .await
            .map_err(|e| translate(e, &Target::maintenance(id)))
    }

    /// Replaces the window's status page associations.
    #[instrument(skip(self, status_pages), fields(count = status_pages.len()))]
    pub async fn add_status_pages(&self, id: i64, status_pages: Vec<StatusPageRef>) -> Result<Value, AppError> {
        let status_pages = status_pages
            .into_iter()
            .map(|p| json!({ "id": p.id, "title": p.title }))
            .collect();

        self.kuma
            .add_status_page_maintenance(id, status_pages)
            .await
            .map_err(|e| translate(e, &Target::new("maintenance or status pages", id)))
    }
}
