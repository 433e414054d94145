use anyhow::{anyhow, Context, Result};
use article_api::{serve, AppState, Config};
use article_core::db::open_pool;
use article_core::{init_logging, ArticleService, SqliteArticleRepository};
use log::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load();
    init_logging(config.effective_log_level(), config.log_dir.as_deref())
        .map_err(|err| anyhow!(err))
        .context("failed to initialize logging")?;

    if config.env_file.is_none() {
        info!("event=config_load module=main status=ok env_file=none detail=no_env_file_found");
    } else {
        info!(
            "event=config_load module=main status=ok env_file={}",
            config.env_file_label()
        );
    }

    info!(
        "event=server_start module=main status=start mode={:?} db_path={} pool_size={}",
        config.mode,
        config.db_path.display(),
        config.pool_size
    );

    let pool = open_pool(&config.db_path, config.pool_size)
        .with_context(|| format!("failed to open database `{}`", config.db_path.display()))?;
    {
        let conn = pool.get().context("failed to check out a database connection")?;
        let articles = ArticleService::new(SqliteArticleRepository::new(&conn))
            .count()
            .context("failed to count stored articles")?;
        info!("event=db_ready module=main status=ok articles={articles}");
    }

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("event=server_listen module=main status=ok addr={addr}");

    serve(listener, AppState::new(pool), shutdown_signal()).await?;
    info!("event=server_stop module=main status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=shutdown_signal module=main status=error error={err}");
        std::future::pending::<()>().await;
    }
}
