//! Core domain logic for the article service.
//! This crate owns the article schema, persistence and request mapping.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod request;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::article::{Article, ArticleDraft, ArticleId, ArticleValidationError};
pub use repo::article_repo::{ArticleRepository, RepoError, RepoResult, SqliteArticleRepository};
pub use request::{ArticlePayload, ArticleUpdatePayload, BulkItem, CreateArticleBody};
pub use service::article_service::{
    ArticleService, BulkCreateOutcome, CreateOutcome, ServiceError, ServiceResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
