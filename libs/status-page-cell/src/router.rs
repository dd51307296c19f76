use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use shared_utils::extractor::auth_middleware;
use shared_utils::AppState;

use crate::handlers;

pub fn status_page_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::list_status_pages).post(handlers::create_status_page))
        .route(
            "/{slug}",
            get(handlers::get_status_page)
                .post(handlers::save_status_page)
                .delete(handlers::delete_status_page),
        )
        .route("/{slug}/incident", post(handlers::post_incident))
        .route("/{slug}/incident/unpin", delete(handlers::unpin_incident))
        .layer(middleware::from_fn_with_state(state.config.clone(), auth_middleware))
        .with_state(state)
}
