use axum::{routing::get, Router};

use maintenance_cell::router::maintenance_routes;
use monitor_cell::router::monitor_routes;
use shared_utils::AppState;
use status_page_cell::router::status_page_routes;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "Kuma gateway is running!" }))
        .nest("/monitors", monitor_routes(state.clone()))
        .nest("/maintenances", maintenance_routes(state.clone()))
        .nest("/status-pages", status_page_routes(state))
}
