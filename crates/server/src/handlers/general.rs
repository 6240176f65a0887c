//! # General Route Handlers
//!
//! This module contains the general-purpose Axum handlers for the
//! `kiomate-server`: the service banner, the health check, the location
//! catalog listing, and the public analytics summary.

use super::{AppError, AppState};
use axum::{extract::State, Json};
use kiomate::{catalog, types::AnalyticsSummary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// --- API Payloads for General Handlers ---

/// The response body for the `/locations` endpoint.
#[derive(Serialize, Deserialize)]
pub struct LocationsResponse {
    pub areas: Vec<String>,
    pub area_contexts: BTreeMap<String, String>,
    pub total: usize,
}

// --- General-Purpose Handlers ---

/// The handler for the root (`/`) endpoint.
pub async fn root(State(app_state): State<AppState>) -> String {
    format!(
        "kiomate server is running ({} provider).",
        app_state.config.provider.provider
    )
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}

/// The handler for the `/locations` endpoint.
///
/// Lists the Lagos areas the insight prompt has dedicated context for.
/// Requests for other locations still work; they use the generic fallback
/// context instead.
pub async fn locations_handler() -> Json<LocationsResponse> {
    let area_contexts: BTreeMap<String, String> = catalog::entries()
        .iter()
        .map(|(area, context)| (area.to_string(), context.to_string()))
        .collect();

    Json(LocationsResponse {
        areas: catalog::supported_areas()
            .iter()
            .map(|area| area.to_string())
            .collect(),
        total: area_contexts.len(),
        area_contexts,
    })
}

/// The handler for the `/analytics/summary` endpoint.
pub async fn analytics_summary_handler(
    State(app_state): State<AppState>,
) -> Result<Json<AnalyticsSummary>, AppError> {
    let summary = app_state.store.analytics_summary().await?;
    Ok(Json(summary))
}
