//! Server configuration from flags, environment and an optional `.env` file.

use article_core::default_log_level;
use clap::{Parser, ValueEnum};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Run mode; only affects the default log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    Debug,
    Release,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "article_api", version, about = "Article CRUD HTTP service")]
pub struct Config {
    /// SQLite database file path.
    #[arg(long, env = "DB_PATH", default_value = "./articles.db")]
    pub db_path: PathBuf,
    /// TCP port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,
    /// Address to bind.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0")]
    pub bind_addr: IpAddr,
    #[arg(long, env = "APP_MODE", value_enum, default_value_t = RunMode::Debug)]
    pub mode: RunMode,
    /// Log level (trace|debug|info|warn|error); defaults by run mode.
    #[arg(long, env = "LOG_LEVEL")]
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files; stderr only when unset.
    #[arg(long, env = "LOG_DIR")]
    pub log_dir: Option<String>,
    /// Maximum pooled SQLite connections.
    #[arg(
        long,
        env = "DB_POOL_SIZE",
        default_value_t = 8,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub pool_size: u32,
    /// `.env` file that was loaded before parsing, if any.
    #[arg(skip)]
    pub env_file: Option<PathBuf>,
}

impl Config {
    /// Loads `.env` when present, then parses process arguments.
    ///
    /// Exits the process with usage output on invalid input.
    pub fn load() -> Self {
        let env_file = dotenv::dotenv().ok();
        Self {
            env_file,
            ..Self::parse()
        }
    }

    /// Loaded `.env` path for startup logging, or `none`.
    pub fn env_file_label(&self) -> String {
        self.env_file
            .as_ref()
            .map_or_else(|| "none".to_string(), |path| path.display().to_string())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// Explicit level, or the run mode default.
    pub fn effective_log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or_else(|| default_log_level(self.mode == RunMode::Release))
    }
}
