//! # Follow-up Chat Flow
//!
//! Conversational follow-ups to a generated insight payload. Unlike the
//! insight pipeline the reply here is free text: no schema, no JSON
//! parsing, only trimming. History is bounded so long sessions cannot
//! grow the prompt without limit.

use crate::{
    errors::GenerationError,
    prompts::{build_chat_prompt, location_label, PROMPT_DATE_FORMAT},
    providers::ai::AiProvider,
    types::ChatTurn,
};
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info};

/// How many stored turns the server fetches per chat request.
pub const HISTORY_FETCH_LIMIT: usize = 6;

/// How many of the fetched turns are embedded in the prompt.
pub const HISTORY_WINDOW: usize = 4;

/// The most recent [`HISTORY_WINDOW`] turns of an oldest-first slice.
pub fn prompt_window(turns: &[ChatTurn]) -> &[ChatTurn] {
    let start = turns.len().saturating_sub(HISTORY_WINDOW);
    &turns[start..]
}

/// Produces a conversational reply about a previously generated insight
/// payload.
///
/// `recent_turns` must be ordered oldest-first; only the most recent
/// [`HISTORY_WINDOW`] of them reach the model. The reply is returned
/// trimmed and otherwise untouched.
pub async fn chat_reply(
    ai_provider: &dyn AiProvider,
    message: &str,
    insight_json: &Value,
    recent_turns: &[ChatTurn],
    business_type: &str,
    location: &str,
    area: Option<&str>,
) -> Result<String, GenerationError> {
    let label = location_label(location, area);
    let current_date = Utc::now().format(PROMPT_DATE_FORMAT).to_string();

    let prompt = build_chat_prompt(
        message,
        insight_json,
        prompt_window(recent_turns),
        business_type,
        &label,
        &current_date,
    );
    info!("Chat follow-up for '{business_type}' in '{label}'");
    debug!("Chat prompt:\n{prompt}");

    let reply = ai_provider.generate(&prompt, true).await?;
    Ok(reply.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatRole;

    fn turn(content: &str) -> ChatTurn {
        ChatTurn::new("s1", ChatRole::User, content)
    }

    #[test]
    fn window_keeps_the_most_recent_turns() {
        let turns: Vec<ChatTurn> = (1..=6).map(|i| turn(&format!("message {i}"))).collect();
        let window = prompt_window(&turns);
        assert_eq!(window.len(), HISTORY_WINDOW);
        assert_eq!(window[0].content, "message 3");
        assert_eq!(window[3].content, "message 6");
    }

    #[test]
    fn window_of_a_short_history_is_the_whole_history() {
        let turns = vec![turn("only one")];
        assert_eq!(prompt_window(&turns).len(), 1);
        assert!(prompt_window(&[]).is_empty());
    }
}
