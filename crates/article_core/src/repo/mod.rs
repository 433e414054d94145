//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage accessor contract for articles.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes enforce `ArticleDraft::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors, including for update and delete.

pub mod article_repo;
