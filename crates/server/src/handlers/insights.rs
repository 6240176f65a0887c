//! # Insight Generation Handlers
//!
//! The core endpoint: a business type and a location in, a validated
//! insight record out, with persistence and an analytics event on the side.

use super::{AppError, AppState};
use axum::{extract::State, Json};
use kiomate::types::InsightRecord;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

// --- API Payloads ---

/// The request body for the `/insights/generate` endpoint.
#[derive(Debug, Deserialize)]
pub struct GenerateInsightsRequest {
    pub business_type: String,
    pub location: String,
    /// A specific area within the location, when known.
    #[serde(default)]
    pub area: Option<String>,
    /// When set, the generated insight is attached to this business's history.
    #[serde(default)]
    pub business_id: Option<String>,
}

/// The handler for the `/insights/generate` endpoint.
pub async fn generate_insights_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<GenerateInsightsRequest>,
) -> Result<Json<InsightRecord>, AppError> {
    info!(
        "Received insight request for '{}' in '{}'",
        payload.business_type, payload.location
    );

    let record = app_state
        .insight_client
        .generate_insights(
            &payload.business_type,
            &payload.location,
            payload.area.as_deref(),
        )
        .await?;

    app_state
        .store
        .append_insight(
            payload.business_id.as_deref(),
            &payload.business_type,
            &payload.location,
            payload.area.as_deref(),
            &record,
        )
        .await?;

    let metadata = json!({
        "business_type": payload.business_type,
        "location": payload.location,
    });
    app_state
        .store
        .track_event(
            "insight_generated",
            payload.business_id.as_deref(),
            Some(&metadata),
        )
        .await;

    Ok(Json(record))
}
