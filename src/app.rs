use crate::handlers;
use crate::routes::ROUTES;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    let pages = ROUTES
        .iter()
        .fold(Router::new(), |router, route| router.route(route.path, get(handlers::page)));

    pages
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/health", get(handlers::health))
        .with_state(state)
}
