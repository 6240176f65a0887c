//! # API Route Handlers
//!
//! This module organizes all the Axum route handlers for the `kiomate-server`.
//! The handlers are split into logical sub-modules based on their functionality
//! (e.g., `insights`, `chat`, `business`).

// Sub-modules for different handler categories.
pub mod business;
pub mod chat;
pub mod general;
pub mod insights;

// Re-export all handlers from the sub-modules to make them easily accessible
// to the router under a single `handlers::` path.
pub use business::*;
pub use chat::*;
pub use general::*;
pub use insights::*;

// Shared items used by multiple handler modules.
use super::{errors::AppError, state::AppState};
