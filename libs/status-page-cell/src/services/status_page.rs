use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{info, instrument};

use shared_kuma::{translate, translate_delete, KumaApi, Target};
use shared_models::AppError;
use shared_utils::response::attach;

use crate::models::{validate_incident, validate_new_page, validate_save, Slug};

pub struct StatusPageService {
    kuma: Arc<dyn KumaApi>,
}

impl StatusPageService {
    pub fn new(kuma: Arc<dyn KumaApi>) -> Self {
        Self { kuma }
    }

    pub async fn list_status_pages(&self) -> Result<Vec<Value>, AppError> {
        self.kuma
            .list_status_pages()
            .await
            .map_err(|e| translate(e, &Target::new("status page", "*")))
    }

    pub async fn get_status_page(&self, slug: &str) -> Result<Value, AppError> {
        let slug = Slug::parse(slug)?;
        self.kuma
            .get_status_page(slug.as_str())
            .await
            .map_err(|e| translate(e, &Target::status_page(slug.as_str())))
    }

    #[instrument(skip(self, payload))]
    pub async fn create_status_page(&self, payload: Value) -> Result<Value, AppError> {
        let page = validate_new_page(&payload)?;

        let result = self
            .kuma
            .add_status_page(page.slug.as_str(), &page.title)
            .await
            .map_err(|e| translate(e, &Target::status_page(page.slug.as_str())))?;

        info!("Status page '{}' created", page.slug);
        Ok(attach(result, "status_page", json!(page)))
    }

    #[instrument(skip(self, payload))]
    pub async fn save_status_page(&self, slug: &str, payload: Value) -> Result<Value, AppError> {
        let slug = Slug::parse(slug)?;
        let settings = validate_save(&payload)?;

        let result = self
            .kuma
            .save_status_page(slug.as_str(), settings.as_map().clone())
            .await
            .map_err(|e| translate(e, &Target::status_page(slug.as_str())))?;

        info!("Status page '{}' saved", slug);
        Ok(attach(result, "status_page", settings.to_value()))
    }

    /// Deleting a page that is already gone, or was never fully set up, succeeds.
    #[instrument(skip(self))]
    pub async fn delete_status_page(&self, slug: &str) -> Result<Value, AppError> {
        let slug = Slug::parse(slug)?;
        translate_delete(
            self.kuma.delete_status_page(slug.as_str()).await,
            &Target::status_page(slug.as_str()),
        )
    }

    #[instrument(skip(self, payload))]
    pub async fn post_incident(&self, slug: &str, payload: Value) -> Result<Value, AppError> {
        let slug = Slug::parse(slug)?;
        let incident = validate_incident(&payload)?;

        self.kuma
            .post_incident(slug.as_str(), incident.into_map())
            .await
            .map_err(|e| translate(e, &Target::status_page(slug.as_str())))
    }

    #[instrument(skip(self))]
    pub async fn unpin_incident(&self, slug: &str) -> Result<Value, AppError> {
        let slug = Slug::parse(slug)?;
        self.kuma
            .unpin_incident(slug.as_str())
            .await
            .map_err(|e| translate(e, &Target::status_page(slug.as_str())))
    }
}
