use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use shared_utils::extractor::auth_middleware;
use shared_utils::AppState;

use crate::handlers;

pub fn monitor_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::list_monitors).post(handlers::create_monitor))
        .route(
            "/{monitor_id}",
            get(handlers::get_monitor)
                .patch(handlers::update_monitor)
                .delete(handlers::delete_monitor),
        )
        .route("/{monitor_id}/beats", get(handlers::get_monitor_beats))
        .route("/{monitor_id}/cert", get(handlers::get_monitor_cert))
        .route("/{monitor_id}/dashboard", get(handlers::get_monitor_dashboard))
        .route("/{monitor_id}/pause", post(handlers::pause_monitor))
        .route("/{monitor_id}/resume", post(handlers::resume_monitor))
        .route(
            "/{monitor_id}/tag",
            post(handlers::add_monitor_tag).delete(handlers::delete_monitor_tag),
        )
        .layer(middleware::from_fn_with_state(state.config.clone(), auth_middleware))
        .with_state(state)
}
