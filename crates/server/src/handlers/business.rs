//! # Business Registry Handlers
//!
//! Registration with collision-checked short ids, lookup, and per-business
//! insight history.

use super::{AppError, AppState};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use kiomate::{
    identity,
    types::{BusinessRecord, StoredInsight},
    StoreError,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// How many history rows `/business/{id}/insights` returns by default.
const DEFAULT_HISTORY_LIMIT: u32 = 10;

// --- API Payloads ---

/// The request body for the `/business/save` endpoint.
#[derive(Debug, Deserialize)]
pub struct SaveBusinessRequest {
    pub business_name: String,
    pub business_type: String,
    pub location: String,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
}

/// The response body for the `/business/save` endpoint.
#[derive(Serialize, Deserialize)]
pub struct SaveBusinessResponse {
    pub business_id: String,
    pub message: String,
}

/// Query parameters for the insight history endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct HistoryParams {
    pub limit: Option<u32>,
}

/// The handler for the `/business/save` endpoint.
///
/// An id collision is a retry signal: the record is re-salted and inserted
/// once more before any conflict is surfaced to the client.
pub async fn save_business_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<SaveBusinessRequest>,
) -> Result<Json<SaveBusinessResponse>, AppError> {
    info!("Saving business '{}'", payload.business_name);

    let mut record = BusinessRecord {
        business_id: identity::generate_business_id(
            &payload.business_name,
            &payload.business_type,
            &payload.location,
        ),
        business_name: payload.business_name,
        business_type: payload.business_type,
        location: payload.location,
        area: payload.area,
        contact: payload.contact,
        created_at: Utc::now(),
        last_active: None,
    };

    if let Err(err) = app_state.store.put_business(&record).await {
        match err {
            StoreError::Conflict(taken) => {
                warn!("Business id '{taken}' already exists, regenerating once");
                record.business_id = identity::generate_business_id(
                    &record.business_name,
                    &record.business_type,
                    &record.location,
                );
                app_state.store.put_business(&record).await?;
            }
            other => return Err(other.into()),
        }
    }

    app_state
        .store
        .track_event("business_saved", Some(&record.business_id), None)
        .await;

    Ok(Json(SaveBusinessResponse {
        business_id: record.business_id,
        message: "Business saved successfully! Save this ID to access your insights anytime."
            .to_string(),
    }))
}

/// The handler for the `GET /business/{business_id}` endpoint.
pub async fn get_business_handler(
    State(app_state): State<AppState>,
    Path(business_id): Path<String>,
) -> Result<Json<BusinessRecord>, AppError> {
    let record = app_state.store.get_business(&business_id).await?;
    Ok(Json(record))
}

/// The handler for the `GET /business/{business_id}/insights` endpoint.
///
/// Returns the business's insight history, most recent first.
pub async fn business_insights_handler(
    State(app_state): State<AppState>,
    Path(business_id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<StoredInsight>>, AppError> {
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let insights = app_state.store.list_insights(&business_id, limit).await?;
    Ok(Json(insights))
}
