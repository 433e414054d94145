//! Article domain model.
//!
//! # Responsibility
//! - Define the persisted `Article` record and the pre-persistence
//!   `ArticleDraft`.
//! - Own required-field validation.
//!
//! # Invariants
//! - `title`, `content` and `author` are non-empty for every stored article.
//! - `id` values are assigned by storage and never reused.
//! - `created_at` never changes after insert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned article identifier.
pub type ArticleId = i64;

/// Validation failures for article write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleValidationError {
    /// A required text field is missing or empty.
    MissingField(&'static str),
}

impl Display for ArticleValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{field} is required"),
        }
    }
}

impl Error for ArticleValidationError {}

/// Persisted article as returned by storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub content: String,
    pub author: String,
    pub category: Option<String>,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable article fields before they reach storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleDraft {
    pub title: String,
    pub content: String,
    pub author: String,
    pub category: Option<String>,
    /// `None` means "not provided"; create paths default it to now.
    pub published_at: Option<DateTime<Utc>>,
}

impl ArticleDraft {
    /// Creates a draft with the required fields and no optional metadata.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author: author.into(),
            category: None,
            published_at: None,
        }
    }

    /// Checks required fields in declaration order.
    ///
    /// Whitespace-only values count as empty.
    pub fn validate(&self) -> Result<(), ArticleValidationError> {
        let required = [
            ("title", &self.title),
            ("content", &self.content),
            ("author", &self.author),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ArticleValidationError::MissingField(field));
            }
        }
        Ok(())
    }

    /// Fills `published_at` with `now` when it was not provided.
    pub fn published_or(mut self, now: DateTime<Utc>) -> Self {
        self.published_at.get_or_insert(now);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{ArticleDraft, ArticleValidationError};
    use chrono::{TimeZone, Utc};

    #[test]
    fn validate_reports_first_missing_field() {
        let draft = ArticleDraft::new("", "", "author");
        assert_eq!(
            draft.validate().unwrap_err(),
            ArticleValidationError::MissingField("title")
        );

        let draft = ArticleDraft::new("title", "   ", "author");
        assert_eq!(
            draft.validate().unwrap_err(),
            ArticleValidationError::MissingField("content")
        );
    }

    #[test]
    fn published_or_keeps_explicit_value() {
        let explicit = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();

        let mut draft = ArticleDraft::new("t", "c", "a");
        draft.published_at = Some(explicit);
        assert_eq!(draft.published_or(now).published_at, Some(explicit));

        let draft = ArticleDraft::new("t", "c", "a");
        assert_eq!(draft.published_or(now).published_at, Some(now));
    }
}
