//! # Prompt Template Modules
//!
//! This module organizes all prompt templates used throughout the `kiomate`
//! library. Builders here are pure: the caller supplies every dynamic value,
//! including the formatted current date, so a prompt is byte-for-byte
//! reproducible from its inputs.

pub mod chat;
pub mod insight;

pub use chat::build_chat_prompt;
pub use insight::build_insight_prompt;

/// chrono format string for the `{current_date}` placeholder,
/// e.g. "August 24, 2026".
pub const PROMPT_DATE_FORMAT: &str = "%B %d, %Y";

/// Renders `"{area}, {location}"` when an area was given, otherwise the
/// location alone. This label is what the model sees as the place name.
pub fn location_label(location: &str, area: Option<&str>) -> String {
    match area {
        Some(area) if !area.trim().is_empty() => format!("{area}, {location}"),
        _ => location.to_string(),
    }
}
