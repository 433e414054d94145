//! Domain model for the article resource.
//!
//! # Responsibility
//! - Define the canonical records used by repository and service code.
//!
//! # Invariants
//! - Persisted articles are identified by a storage-assigned `ArticleId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod article;
