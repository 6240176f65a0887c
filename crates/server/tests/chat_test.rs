//! # Chat Endpoint Tests
//!
//! `/chat` turns a question about a generated insight payload into a
//! free-text reply. These tests cover session minting, transcript
//! persistence, and the bounded history window embedded into the prompt.

mod common;

use anyhow::Result;
use chrono::{Duration, Utc};
use common::{TestApp, MOCK_GEMINI_PATH};
use httpmock::Method;
use kiomate::types::{ChatRole, ChatTurn};
use serde_json::{json, Value};

const MOCK_REPLY: &str = "Focus your ads on weekday evenings.";

#[tokio::test]
async fn test_chat_mints_a_session_and_persists_the_exchange() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;
    let gemini_mock = app.mock_server.mock(|when, then| {
        when.method(Method::POST)
            .path(MOCK_GEMINI_PATH)
            .body_contains("How do I advertise");
        then.status(200).json_body(
            json!({"candidates": [{"content": {"parts": [{"text": MOCK_REPLY}]}}]}),
        );
    });

    let message = "How do I advertise my shop?";
    let payload = json!({
        "message": message,
        "business_type": "Fashion",
        "location": "Ikeja",
        "insight_data": serde_json::to_value(common::sample_insight_fields())?
    });

    // Act
    let response = app
        .client
        .post(format!("{}/chat", app.address))
        .json(&payload)
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert!(
        response.status().is_success(),
        "Request failed with status: {}",
        response.status()
    );
    let body: Value = response.json().await?;
    assert_eq!(body["response"], MOCK_REPLY);

    let session_id = body["session_id"].as_str().unwrap();
    assert_eq!(session_id.len(), 16);
    assert!(session_id.chars().all(|c| c.is_ascii_hexdigit()));

    // Both sides of the exchange must land in the transcript, in order.
    let transcript = app.store().list_chat_turns(session_id).await?;
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].role, ChatRole::User);
    assert_eq!(transcript[0].content, message);
    assert_eq!(transcript[1].role, ChatRole::Assistant);
    assert_eq!(transcript[1].content, MOCK_REPLY);

    gemini_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_chat_reuses_the_session_and_embeds_recent_history() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;
    let session_id = "feedfacecafe0123";

    // Seed three prior exchanges with staggered timestamps. With a
    // four-turn prompt window, only "question 2" onwards may reach the
    // model.
    let base = Utc::now() - Duration::minutes(5);
    for i in 1..=3 {
        let mut user_turn = ChatTurn::new(session_id, ChatRole::User, &format!("question {i}"));
        user_turn.timestamp = base + Duration::seconds(i * 2);
        let mut assistant_turn =
            ChatTurn::new(session_id, ChatRole::Assistant, &format!("answer {i}"));
        assistant_turn.timestamp = base + Duration::seconds(i * 2 + 1);
        app.store()
            .append_chat_exchange(&user_turn, &assistant_turn)
            .await?;
    }

    let gemini_mock = app.mock_server.mock(|when, then| {
        when.method(Method::POST)
            .path(MOCK_GEMINI_PATH)
            .body_contains("question 2")
            .body_contains("answer 3")
            .body_contains("What about weekends?");
        then.status(200).json_body(
            json!({"candidates": [{"content": {"parts": [{"text": "Try a Saturday stall."}]}}]}),
        );
    });

    let payload = json!({
        "message": "What about weekends?",
        "business_type": "Fashion",
        "location": "Ikeja",
        "insight_data": serde_json::to_value(common::sample_insight_fields())?,
        "session_id": session_id
    });

    // Act
    let response = app
        .client
        .post(format!("{}/chat", app.address))
        .json(&payload)
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert!(
        response.status().is_success(),
        "Request failed with status: {}",
        response.status()
    );
    let body: Value = response.json().await?;
    assert_eq!(body["session_id"], session_id);

    // Three seeded exchanges plus the new one.
    let transcript = app.store().list_chat_turns(session_id).await?;
    assert_eq!(transcript.len(), 8);

    gemini_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_blank_session_id_is_replaced_with_a_minted_one() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;
    app.mock_server.mock(|when, then| {
        when.method(Method::POST).path(MOCK_GEMINI_PATH);
        then.status(200).json_body(
            json!({"candidates": [{"content": {"parts": [{"text": "Keep prices steady."}]}}]}),
        );
    });

    let payload = json!({
        "message": "Should I raise prices?",
        "business_type": "Food",
        "location": "Surulere",
        "insight_data": serde_json::to_value(common::sample_insight_fields())?,
        "session_id": ""
    });

    // Act
    let response = app
        .client
        .post(format!("{}/chat", app.address))
        .json(&payload)
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert!(response.status().is_success());
    let body: Value = response.json().await?;
    let session_id = body["session_id"].as_str().unwrap();
    assert!(!session_id.is_empty());
    assert_eq!(session_id.len(), 16);

    Ok(())
}
