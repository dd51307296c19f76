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

use crate::services::StatusPageService;

fn service(state: &AppState) -> StatusPageService {
    StatusPageService::new(state.kuma.clone())
}

pub async fn list_status_pages(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let pages = service(&state).list_status_pages().await?;
    Ok(Json(json!({ "status_pages": pages })))
}

pub async fn get_status_page(
    State(state): State<AppState>,
    Segment(slug): Segment<String>,
) -> Result<Json<Value>, AppError> {
    let page = service(&state).get_status_page(&slug).await?;
    Ok(Json(page))
}

#[axum::debug_handler]
pub async fn create_status_page(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Payload(payload): Payload<Value>,
) -> Result<Json<Value>, AppError> {
    debug!("User {} creating status page", user.id);
    let created = service(&state).create_status_page(payload).await?;
    Ok(Json(created))
}

pub async fn save_status_page(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Segment(slug): Segment<String>,
    Payload(payload): Payload<Value>,
) -> Result<Json<Value>, AppError> {
    debug!("User {} saving status page '{}'", user.id, slug);
    let saved = service(&state).save_status_page(&slug, payload).await?;
    Ok(Json(saved))
}

pub async fn delete_status_page(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Segment(slug): Segment<String>,
) -> Result<Json<Value>, AppError> {
    debug!("User {} deleting status page '{}'", user.id, slug);
    let result = service(&state).delete_status_page(&slug).await?;
    Ok(Json(result))
}

pub async fn post_incident(
    State(state): State<AppState>,
    Segment(slug): Segment<String>,
    Payload(payload): Payload<Value>,
) -> Result<Json<Value>, AppError> {
    let incident = service(&state).post_incident(&slug, payload).await?;
    Ok(Json(incident))
}

pub async fn unpin_incident(
    State(state): State<AppState>,
    Segment(slug): Segment<String>,
) -> Result<Json<Value>, AppError> {
    let result = service(&state).unpin_incident(&slug).await?;
    Ok(Json(result))
}
