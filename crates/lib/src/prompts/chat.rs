//! # Follow-up Chat Prompt
//!
//! Template for the conversational follow-up flow: the owner's previously
//! generated insight payload is embedded verbatim, together with a bounded
//! window of recent turns, so the model can reference both when answering
//! the new question.

use crate::types::ChatTurn;
use serde_json::{json, Value};

/// Shown in place of the history block for a brand-new session.
const NO_HISTORY_PLACEHOLDER: &str = "No previous messages";

/// The follow-up chat prompt template.
///
/// Placeholders: `{business_type}`, `{location}`, `{current_date}`,
/// `{insight_json}`, `{chat_history}`, `{user_message}`
pub const CHAT_PROMPT_TEMPLATE: &str = r#"You are a Nigerian business advisor chatting on {current_date}.

Business Context:
- Type: {business_type}
- Location: {location}

Their Insights:
{insight_json}

Recent Chat:
{chat_history}

User Question: {user_message}

Respond in 2-3 short paragraphs. Be specific, practical, and reference their insights.
Use Google Search if you need current information about Nigeria, {location}, or {business_type} businesses.
Keep responses conversational and actionable."#;

/// Builds the follow-up chat prompt.
///
/// `recent_turns` must already be windowed and ordered oldest-first; this
/// function embeds whatever it is given without trimming. The insight
/// payload and the history are rendered as pretty-printed JSON so the
/// model sees the same structure the API returned.
pub fn build_chat_prompt(
    user_message: &str,
    insight_json: &Value,
    recent_turns: &[ChatTurn],
    business_type: &str,
    location_label: &str,
    current_date: &str,
) -> String {
    let history = if recent_turns.is_empty() {
        NO_HISTORY_PLACEHOLDER.to_string()
    } else {
        let rendered: Vec<Value> = recent_turns
            .iter()
            .map(|turn| json!({ "role": turn.role.as_str(), "message": turn.content }))
            .collect();
        format!("{:#}", Value::Array(rendered))
    };

    CHAT_PROMPT_TEMPLATE
        .replace("{business_type}", business_type)
        .replace("{location}", location_label)
        .replace("{current_date}", current_date)
        .replace("{insight_json}", &format!("{insight_json:#}"))
        .replace("{chat_history}", &history)
        .replace("{user_message}", user_message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatRole;

    #[test]
    fn empty_history_uses_placeholder() {
        let insights = json!({ "peak_hours": "9am-6pm" });
        let prompt = build_chat_prompt(
            "When should I restock?",
            &insights,
            &[],
            "Shoe store",
            "Ikeja",
            "August 24, 2026",
        );
        assert!(prompt.contains(NO_HISTORY_PLACEHOLDER));
        assert!(prompt.contains("User Question: When should I restock?"));
        assert!(prompt.contains("\"peak_hours\": \"9am-6pm\""));
    }

    #[test]
    fn history_turns_are_embedded_in_order() {
        let turns = vec![
            ChatTurn::new("abc123", ChatRole::User, "What about weekends?"),
            ChatTurn::new("abc123", ChatRole::Assistant, "Weekends peak after noon."),
        ];
        let prompt = build_chat_prompt(
            "And holidays?",
            &json!({}),
            &turns,
            "Salon",
            "Lekki",
            "August 24, 2026",
        );
        let user_pos = prompt
            .find("What about weekends?")
            .expect("user turn missing");
        let assistant_pos = prompt
            .find("Weekends peak after noon.")
            .expect("assistant turn missing");
        assert!(user_pos < assistant_pos);
        assert!(prompt.contains("\"role\": \"user\""));
        assert!(prompt.contains("\"role\": \"assistant\""));
    }
}
