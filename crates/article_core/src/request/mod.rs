//! Inbound JSON payloads and their mapping to article drafts.
//!
//! # Responsibility
//! - Decode the create body as either one article object or an array.
//! - Copy recognized fields leniently for create; decode update strictly.
//!
//! # Invariants
//! - Create payload fields are taken only when they are JSON strings;
//!   anything else is treated as absent.
//! - `published_at` is accepted only as an RFC 3339 date-time.
//! - A non-object element inside a create array never aborts its siblings.

use crate::model::article::ArticleDraft;
use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Create request body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CreateArticleBody {
    Single(ArticlePayload),
    List(Vec<BulkItem>),
}

impl CreateArticleBody {
    /// Decodes an already parsed JSON document.
    ///
    /// Scalars and `null` are rejected with a human-readable message.
    pub fn from_value(value: Value) -> Result<Self, String> {
        Self::deserialize(value).map_err(|_| {
            "invalid body format: send an object for one article or an array for several"
                .to_string()
        })
    }
}

/// One element of a bulk create array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BulkItem {
    Object(ArticlePayload),
    /// Anything that is not a JSON object.
    Malformed(Value),
}

/// Leniently decoded create object.
///
/// Deserializes only from a JSON object; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct ArticlePayload {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<Map<String, Value>> for ArticlePayload {
    fn from(mut object: Map<String, Value>) -> Self {
        Self {
            title: take_string(&mut object, "title"),
            content: take_string(&mut object, "content"),
            author: take_string(&mut object, "author"),
            category: take_string(&mut object, "category"),
            published_at: take_string(&mut object, "published_at")
                .as_deref()
                .and_then(parse_timestamp),
        }
    }
}

impl ArticlePayload {
    /// Builds a draft; missing text fields become empty and fail validation
    /// downstream.
    pub fn into_draft(self) -> ArticleDraft {
        ArticleDraft {
            title: self.title.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            author: self.author.unwrap_or_default(),
            category: self.category,
            published_at: self.published_at,
        }
    }
}

/// Full-replacement update body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArticleUpdatePayload {
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub published_at: Option<DateTime<Utc>>,
}

impl ArticleUpdatePayload {
    /// Builds a draft; an absent `published_at` stays `None` so storage keeps
    /// the current value.
    pub fn into_draft(self) -> ArticleDraft {
        ArticleDraft {
            title: self.title,
            content: self.content,
            author: self.author,
            category: self.category,
            published_at: self.published_at,
        }
    }
}

fn take_string(object: &mut Map<String, Value>, key: &str) -> Option<String> {
    match object.remove(key) {
        Some(Value::String(value)) => Some(value),
        _ => None,
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

fn deserialize_optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_timestamp(&raw).map(Some).ok_or_else(|| {
            D::Error::custom(format!(
                "published_at `{raw}` is not an RFC 3339 date-time"
            ))
        }),
    }
}
