//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate request mapping and repository calls into use-case APIs.
//! - Keep the HTTP layer decoupled from storage details.

pub mod article_service;
