//! HTTP surface: routes, handlers and middleware.

pub mod handlers;
pub mod request_log;
pub mod response;
pub mod state;

use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::http::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/api/v1/health", get(handlers::health))
        .route(
            "/api/v1/articles",
            get(handlers::list_articles).post(handlers::create_article),
        )
        .route(
            "/api/v1/articles/:id",
            get(handlers::get_article)
                .put(handlers::update_article)
                .delete(handlers::delete_article),
        )
        .fallback(handlers::fallback)
        .with_state(state)
        .layer(middleware::from_fn(request_log::request_log_middleware))
        .layer(cors)
}
