//! # Chat Handlers
//!
//! Follow-up questions about a previously generated insight payload.
//! Sessions are minted on first contact; every exchange is stored as an
//! atomic user/assistant pair.

use super::{AppError, AppState};
use axum::{extract::State, Json};
use kiomate::{
    chat::{self, HISTORY_FETCH_LIMIT},
    identity,
    types::{ChatRole, ChatTurn},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

// --- API Payloads ---

/// The request body for the `/chat` endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub business_type: String,
    pub location: String,
    #[serde(default)]
    pub area: Option<String>,
    /// The previously generated insight payload the conversation is about.
    pub insight_data: Value,
    /// Absent on the first message; the minted id comes back in the response.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// The response body for the `/chat` endpoint.
#[derive(Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
}

/// The handler for the `/chat` endpoint.
pub async fn chat_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let session_id = payload
        .session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(identity::mint_session_id);
    info!("Chat message for session '{session_id}'");

    let recent_turns = app_state
        .store
        .recent_chat_turns(&session_id, HISTORY_FETCH_LIMIT as u32)
        .await?;

    let reply = chat::chat_reply(
        &**app_state.ai_provider,
        &payload.message,
        &payload.insight_data,
        &recent_turns,
        &payload.business_type,
        &payload.location,
        payload.area.as_deref(),
    )
    .await?;

    let user_turn = ChatTurn::new(&session_id, ChatRole::User, &payload.message);
    let assistant_turn = ChatTurn::new(&session_id, ChatRole::Assistant, &reply);
    app_state
        .store
        .append_chat_exchange(&user_turn, &assistant_turn)
        .await?;

    let metadata = json!({ "session_id": session_id });
    app_state
        .store
        .track_event("chat_message", None, Some(&metadata))
        .await;

    Ok(Json(ChatResponse {
        response: reply,
        session_id,
    }))
}
