//! # Location-Aware Business Insights
//!
//! This crate turns a business type and a Nigerian (Lagos-focused)
//! location into structured, validated customer insights by prompting a
//! configurable AI provider with live-search grounding, and supports
//! conversational follow-ups about a generated insight payload. Durable
//! state (businesses, insight history, chat transcripts, analytics) lives
//! in a local SQLite database.

pub mod catalog;
pub mod chat;
pub mod errors;
pub mod identity;
pub mod insight;
pub mod prompts;
pub mod providers;
pub mod types;

pub use errors::{GenerationError, InsightError, SchemaError, StoreError};
pub use insight::InsightClient;
pub use providers::ai::AiProvider;
pub use providers::db::sqlite::SqliteStore;
