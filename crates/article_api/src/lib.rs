//! HTTP service exposing CRUD operations over articles.

pub mod config;
pub mod http;

pub use config::{Config, RunMode};
pub use http::create_router;
pub use http::state::AppState;

use std::future::Future;
use tokio::net::TcpListener;

/// Serves the API on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
