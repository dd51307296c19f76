use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_models::auth::User;
use shared_models::error::AppError;
use shared_utils::extractor::{Params, Payload, Segment};
use shared_utils::AppState;

use crate::models::{BeatsQuery, DashboardQuery, DashboardSnapshot, TagRequest};
use crate::services::{DashboardService, MonitorService};

fn service(state: &AppState) -> MonitorService {
    MonitorService::new(state.kuma.clone())
}

pub async fn list_monitors(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let monitors = service(&state).list_monitors().await?;
    Ok(Json(json!({ "monitors": monitors })))
}

pub async fn get_monitor(
    State(state): State<AppState>,
    Segment(monitor_id): Segment<i64>,
) -> Result<Json<Value>, AppError> {
    let monitor = service(&state).get_monitor(monitor_id).await?;
    Ok(Json(monitor))
}

pub async fn get_monitor_beats(
    State(state): State<AppState>,
    Segment(monitor_id): Segment<i64>,
    Params(query): Params<BeatsQuery>,
) -> Result<Json<Value>, AppError> {
    let beats = service(&state).get_beats(monitor_id, query.hours).await?;
    Ok(Json(json!({ "monitor_id": monitor_id, "hours": query.hours, "heartbeats": beats })))
}

pub async fn get_monitor_cert(
    State(state): State<AppState>,
    Segment(monitor_id): Segment<i64>,
) -> Result<Json<Value>, AppError> {
    let cert = service(&state).get_cert(monitor_id).await?;
    Ok(Json(cert))
}

#[axum::debug_handler]
pub async fn get_monitor_dashboard(
    State(state): State<AppState>,
    Segment(monitor_id): Segment<i64>,
    Params(query): Params<DashboardQuery>,
) -> Result<Json<DashboardSnapshot>, AppError> {
    let snapshot = DashboardService::new(state.kuma.clone())
        .assemble(monitor_id, query.heartbeat_hours)
        .await?;
    Ok(Json(snapshot))
}

#[axum::debug_handler]
pub async fn create_monitor(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Payload(payload): Payload<Value>,
) -> Result<Json<Value>, AppError> {
    debug!("User {} creating monitor", user.id);
    let created = service(&state).create_monitor(payload).await?;
    Ok(Json(created))
}

pub async fn update_monitor(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Segment(monitor_id): Segment<i64>,
    Payload(payload): Payload<Value>,
) -> Result<Json<Value>, AppError> {
    debug!("User {} updating monitor {}", user.id, monitor_id);
    let updated = service(&state).update_monitor(monitor_id, payload).await?;
    Ok(Json(updated))
}

pub async fn delete_monitor(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Segment(monitor_id): Segment<i64>,
) -> Result<Json<Value>, AppError> {
    debug!("User {} deleting monitor {}", user.id, monitor_id);
    let result = service(&state).delete_monitor(monitor_id).await?;
    Ok(Json(result))
}

pub async fn pause_monitor(
    State(state): State<AppState>,
    Segment(monitor_id): Segment<i64>,
) -> Result<Json<Value>, AppError> {
    let result = service(&state).pause_monitor(monitor_id).await?;
    Ok(Json(result))
}

pub async fn resume_monitor(
    State(state): State<AppState>,
    Segment(monitor_id): Segment<i64>,
) -> Result<Json<Value>, AppError> {
    let result = service(&state).resume_monitor(monitor_id).await?;
    Ok(Json(result))
}

pub async fn add_monitor_tag(
    State(state): State<AppState>,
    Segment(monitor_id): Segment<i64>,
    Payload(tag): Payload<TagRequest>,
) -> Result<Json<Value>, AppError> {
    let result = service(&state).add_tag(monitor_id, tag).await?;
    Ok(Json(result))
}

pub async fn delete_monitor_tag(
    State(state): State<AppState>,
    Segment(monitor_id): Segment<i64>,
    Payload(tag): Payload<TagRequest>,
) -> Result<Json<Value>, AppError> {
    let result = service(&state).delete_tag(monitor_id, tag).await?;
    Ok(Json(result))
}
