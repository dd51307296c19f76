use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_models::auth::User;
use shared_models::error::AppError;
use shared_utils::extractor::{Payload, Segment};
use shared_utils::AppState;

use crate::models::{MonitorRef, StatusPageRef};
use crate::services::MaintenanceService;

fn service(state: &AppState) -> MaintenanceService {
    MaintenanceService::new(state.kuma.clone())
}

pub async fn list_maintenances(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let maintenances = service(&state).list_maintenances().await?;
    Ok(Json(json!({ "maintenances": maintenances })))
}

pub async fn get_maintenance(
    State(state): State<AppState>,
    Segment(maintenance_id): Segment<i64>,
) -> Result<Json<Value>, AppError> {
    let maintenance = service(&state).get_maintenance(maintenance_id).await?;
    Ok(Json(maintenance))
}

#[axum::debug_handler]
pub async fn create_maintenance(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Payload(payload): Payload<Value>,
) -> Result<Json<Value>, AppError> {
    debug!("User {} creating maintenance window", user.id);
    let created = service(&state).create_maintenance(payload).await?;
    Ok(Json(created))
}

pub async fn update_maintenance(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Segment(maintenance_id): Segment<i64>,
    Payload(payload): Payload<Value>,
) -> Result<Json<Value>, AppError> {
    debug!("User {} updating maintenance window {}", user.id, maintenance_id);
    let updated = service(&state).update_maintenance(maintenance_id, payload).await?;
    Ok(Json(updated))
}

pub async fn delete_maintenance(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Segment(maintenance_id): Segment<i64>,
) -> Result<Json<Value>, AppError> {
    debug!("User {} deleting maintenance window {}", user.id, maintenance_id);
    let result = service(&state).delete_maintenance(maintenance_id).await?;
    Ok(Json(result))
}

pub async fn pause_maintenance(
    State(state): State<AppState>,
    Segment(maintenance_id): Segment<i64>,
) -> Result<Json<Value>, AppError> {
    let result = service(&state).pause_maintenance(maintenance_id).await?;
    Ok(Json(result))
}

pub async fn resume_maintenance(
    State(state): State<AppState>,
    Segment(maintenance_id): Segment<i64>,
) -> Result<Json<Value>, AppError> {
    let result = service(&state).resume_maintenance(maintenance_id).await?;
    Ok(Json(result))
}

pub async fn get_maintenance_monitors(
    State(state): State<AppState>,
    Segment(maintenance_id): Segment<i64>,
) -> Result<Json<Value>, AppError> {
    let monitors = service(&state).get_monitors(maintenance_id).await?;
    Ok(Json(json!({ "maintenance_id": maintenance_id, "monitors": monitors })))
}

pub async fn add_maintenance_monitors(
    State(state): State<AppState>,
    Segment(maintenance_id): Segment<i64>,
    Payload(monitors): Payload<Vec<MonitorRef>>,
) -> Result<Json<Value>, AppError> {
    let result = service(&state).add_monitors(maintenance_id, monitors).await?;
    Ok(Json(result))
}

pub async fn get_maintenance_status_pages(
    State(state): State<AppState>,
    Segment(maintenance_id): Segment<i64>,
) -> Result<Json<Value>, AppError> {
    let status_pages = service(&state).get_status_pages(maintenance_id).await?;
    Ok(Json(json!({ "maintenance_id": maintenance_id, "status_pages": status_pages })))
}

pub async fn add_maintenance_status_pages(
    State(state): State<AppState>,
    Segment(maintenance_id): Segment<i64>,
    Payload(status_pages): Payload<Vec<StatusPageRef>>,
) -> Result<Json<Value>, AppError> {
    let result = service(&state).add_status_pages(maintenance_id, status_pages).await?;
    Ok(Json(result))
}
