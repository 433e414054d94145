//! Article use-case service.
//!
//! # Responsibility
//! - Turn decoded request bodies into repository writes.
//! - Implement bulk create with per-element failure reporting.
//!
//! # Invariants
//! - Bulk create is not atomic: each element is written on its own and
//!   earlier successes stay persisted when later elements fail.
//! - Failure reasons carry the 1-based position of the element.
//! - A bulk request fails as a whole only when no element was created.

use crate::model::article::{Article, ArticleId};
use crate::repo::article_repo::{ArticleRepository, RepoError};
use crate::request::{ArticlePayload, ArticleUpdatePayload, BulkItem, CreateArticleBody};
use chrono::Utc;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for article use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Input is missing a required field or has an empty one.
    Validation(String),
    /// Target article does not exist.
    NotFound(ArticleId),
    /// Storage-layer failure.
    Persistence(RepoError),
    /// Every element of a bulk create failed; reasons are in input order.
    BulkFailed(Vec<String>),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "{message}"),
            Self::NotFound(id) => write!(f, "article not found: {id}"),
            Self::Persistence(err) => write!(f, "{err}"),
            Self::BulkFailed(reasons) if reasons.is_empty() => {
                write!(f, "failed to create all articles: no articles given")
            }
            Self::BulkFailed(reasons) => {
                write!(f, "failed to create all articles: {}", reasons.join("; "))
            }
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::Validation(err.to_string()),
            other => Self::Persistence(other),
        }
    }
}

/// Result of a bulk create that created at least one article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkCreateOutcome {
    /// Created articles in input order.
    pub created: Vec<Article>,
    /// `article #N: reason` entries in input order.
    pub errors: Vec<String>,
}

/// Result of dispatching a create body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Single(Article),
    Bulk(BulkCreateOutcome),
}

/// Article service facade over repository implementations.
pub struct ArticleService<R: ArticleRepository> {
    repo: R,
}

impl<R: ArticleRepository> ArticleService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one or many articles depending on the body shape.
    pub fn create(&self, body: CreateArticleBody) -> ServiceResult<CreateOutcome> {
        match body {
            CreateArticleBody::Single(payload) => self.create_one(payload).map(CreateOutcome::Single),
            CreateArticleBody::List(items) => self.create_many(items).map(CreateOutcome::Bulk),
        }
    }

    /// Creates one article, defaulting `published_at` to now.
    pub fn create_one(&self, payload: ArticlePayload) -> ServiceResult<Article> {
        let draft = payload.into_draft().published_or(Utc::now());
        draft
            .validate()
            .map_err(|err| ServiceError::Validation(err.to_string()))?;

        let article = self.repo.create(&draft)?;
        info!(
            "event=article_create module=service status=ok article_id={}",
            article.id
        );
        Ok(article)
    }

    /// Creates every element independently.
    ///
    /// # Errors
    /// - `ServiceError::BulkFailed` when no element was created.
    pub fn create_many(&self, items: Vec<BulkItem>) -> ServiceResult<BulkCreateOutcome> {
        let total = items.len();
        let mut created = Vec::new();
        let mut errors = Vec::new();

        for (index, item) in items.into_iter().enumerate() {
            let position = index + 1;
            let result = match item {
                BulkItem::Object(payload) => self.create_one(payload).map_err(|err| err.to_string()),
                BulkItem::Malformed(_) => Err("invalid article format".to_string()),
            };

            match result {
                Ok(article) => created.push(article),
                Err(reason) => errors.push(format!("article #{position}: {reason}")),
            }
        }

        if created.is_empty() {
            warn!(
                "event=article_bulk_create module=service status=error total={total} failed={}",
                errors.len()
            );
            return Err(ServiceError::BulkFailed(errors));
        }

        info!(
            "event=article_bulk_create module=service status=ok total={total} created={} failed={}",
            created.len(),
            errors.len()
        );
        Ok(BulkCreateOutcome { created, errors })
    }

    pub fn get(&self, id: ArticleId) -> ServiceResult<Article> {
        Ok(self.repo.get_by_id(id)?)
    }

    /// Lists all articles, newest first.
    pub fn list(&self) -> ServiceResult<Vec<Article>> {
        Ok(self.repo.get_all()?)
    }

    /// Replaces the mutable fields of an existing article and returns the
    /// stored result.
    ///
    /// An absent `published_at` keeps the stored publish date. A missing id
    /// is reported by storage as `NotFound`.
    pub fn update(&self, id: ArticleId, payload: ArticleUpdatePayload) -> ServiceResult<Article> {
        let draft = payload.into_draft();
        draft
            .validate()
            .map_err(|err| ServiceError::Validation(err.to_string()))?;

        self.repo.update(id, &draft)?;
        info!("event=article_update module=service status=ok article_id={id}");
        Ok(self.repo.get_by_id(id)?)
    }

    pub fn delete(&self, id: ArticleId) -> ServiceResult<()> {
        self.repo.delete(id)?;
        info!("event=article_delete module=service status=ok article_id={id}");
        Ok(())
    }

    /// Number of stored articles.
    pub fn count(&self) -> ServiceResult<u64> {
        Ok(self.repo.count()?)
    }
}
