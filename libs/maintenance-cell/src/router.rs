use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use shared_utils::extractor::auth_middleware;
use shared_utils::AppState;

use crate::handlers;

pub fn maintenance_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::list_maintenances).post(handlers::create_maintenance))
        .route(
            "/{maintenance_id}",
            get(handlers::get_maintenance)
                .patch(handlers::update_maintenance)
                .delete(handlers::delete_maintenance),
        )
        .route("/{maintenance_id}/pause", post(handlers::pause_maintenance))
        .route("/{maintenance_id}/resume", post(handlers::resume_maintenance))
        .route(
            "/{maintenance_id}/monitors",
            get(handlers::get_maintenance_monitors).post(handlers::add_maintenance_monitors),
        )
        .route(
            "/{maintenance_id}/status-pages",
            get(handlers::get_maintenance_status_pages).post(handlers::add_maintenance_status_pages),
        )
        .layer(middleware::from_fn_with_state(state.config.clone(), auth_middleware))
        .with_state(state)
}
