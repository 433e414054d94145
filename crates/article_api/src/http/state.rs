use crate::http::response::{ApiError, ApiResult};
use article_core::db::{DbPool, PooledConn};
use article_core::{ArticleService, ServiceResult, SqliteArticleRepository};
use log::error;

/// Shared router state; holds the injected connection pool.
#[derive(Clone)]
pub struct AppState {
    pool: DbPool,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Runs `op` against a pooled connection on the blocking thread pool.
    pub async fn run<T, F>(&self, op: F) -> ApiResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&ArticleService<SqliteArticleRepository<'_>>) -> ServiceResult<T>
            + Send
            + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = checkout(&pool)?;
            let service = ArticleService::new(SqliteArticleRepository::new(&conn));
            op(&service).map_err(ApiError::from)
        })
        .await
        .map_err(|err| {
            error!("event=blocking_task module=http status=error error={err}");
            ApiError::Internal("request worker failed".to_string())
        })?
    }
}

fn checkout(pool: &DbPool) -> ApiResult<PooledConn> {
    pool.get().map_err(|err| {
        error!("event=db_checkout module=http status=error error={err}");
        ApiError::Internal(format!("storage unavailable: {err}"))
    })
}
