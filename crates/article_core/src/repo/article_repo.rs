//! Article repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `articles` table.
//! - Keep SQL and timestamp encoding inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `ArticleDraft::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Zero affected rows on update/delete is reported as `NotFound`.
//! - Timestamps are stored as UTC epoch milliseconds.

use crate::db::DbError;
use crate::model::article::{Article, ArticleDraft, ArticleId, ArticleValidationError};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ARTICLE_COLUMNS: &str =
    "id, title, content, author, category, published_at, created_at, updated_at";

const NOW_MS_SQL: &str = "CAST((julianday('now') - 2440587.5) * 86400000 AS INTEGER)";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for article persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ArticleValidationError),
    Db(DbError),
    NotFound(ArticleId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "article not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted article data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ArticleValidationError> for RepoError {
    fn from(value: ArticleValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage accessor for articles.
pub trait ArticleRepository {
    /// Inserts a row and returns it with storage-assigned id and timestamps.
    fn create(&self, draft: &ArticleDraft) -> RepoResult<Article>;
    fn get_by_id(&self, id: ArticleId) -> RepoResult<Article>;
    /// Newest first by `created_at`, then by `id`.
    fn get_all(&self) -> RepoResult<Vec<Article>>;
    /// Overwrites mutable fields; `draft.published_at = None` keeps the
    /// stored value.
    fn update(&self, id: ArticleId, draft: &ArticleDraft) -> RepoResult<()>;
    fn delete(&self, id: ArticleId) -> RepoResult<()>;
    fn count(&self) -> RepoResult<u64>;
}

/// SQLite-backed article repository.
pub struct SqliteArticleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteArticleRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ArticleRepository for SqliteArticleRepository<'_> {
    fn create(&self, draft: &ArticleDraft) -> RepoResult<Article> {
        draft.validate()?;

        let sql = format!(
            "INSERT INTO articles (title, content, author, category, published_at)
             VALUES (?1, ?2, ?3, ?4, COALESCE(?5, {NOW_MS_SQL}))
             RETURNING {ARTICLE_COLUMNS};"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params![
            draft.title.as_str(),
            draft.content.as_str(),
            draft.author.as_str(),
            draft.category.as_deref(),
            draft.published_at.map(to_millis),
        ])?;

        if let Some(row) = rows.next()? {
            return parse_article_row(row);
        }

        Err(RepoError::InvalidData("insert returned no row".to_string()))
    }

    fn get_by_id(&self, id: ArticleId) -> RepoResult<Article> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return parse_article_row(row);
        }

        Err(RepoError::NotFound(id))
    }

    fn get_all(&self) -> RepoResult<Vec<Article>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles ORDER BY created_at DESC, id DESC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut articles = Vec::new();
        while let Some(row) = rows.next()? {
            articles.push(parse_article_row(row)?);
        }

        Ok(articles)
    }

    fn update(&self, id: ArticleId, draft: &ArticleDraft) -> RepoResult<()> {
        draft.validate()?;

        let changed = self.conn.execute(
            &format!(
                "UPDATE articles
                 SET
                    title = ?1,
                    content = ?2,
                    author = ?3,
                    category = ?4,
                    published_at = COALESCE(?5, published_at),
                    updated_at = {NOW_MS_SQL}
                 WHERE id = ?6;"
            ),
            params![
                draft.title.as_str(),
                draft.content.as_str(),
                draft.author.as_str(),
                draft.category.as_deref(),
                draft.published_at.map(to_millis),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete(&self, id: ArticleId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM articles WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn count(&self) -> RepoResult<u64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM articles;", [], |row| row.get::<_, i64>(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative article count `{count}`")))
    }
}

fn parse_article_row(row: &Row<'_>) -> RepoResult<Article> {
    let draft = ArticleDraft {
        title: row.get("title")?,
        content: row.get("content")?,
        author: row.get("author")?,
        category: row.get("category")?,
        published_at: None,
    };
    draft
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("{err} in stored article")))?;

    let published_at = match row.get::<_, Option<i64>>("published_at")? {
        Some(value) => from_millis("published_at", value)?,
        None => {
            return Err(RepoError::InvalidData(
                "missing value in articles.published_at".to_string(),
            ));
        }
    };

    Ok(Article {
        id: row.get("id")?,
        title: draft.title,
        content: draft.content,
        author: draft.author,
        category: draft.category,
        published_at,
        created_at: from_millis("created_at", row.get("created_at")?)?,
        updated_at: from_millis("updated_at", row.get("updated_at")?)?,
    })
}

fn to_millis(value: DateTime<Utc>) -> i64 {
    value.timestamp_millis()
}

fn from_millis(column: &str, value: i64) -> RepoResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(value).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "timestamp `{value}` out of range in articles.{column}"
        ))
    })
}
