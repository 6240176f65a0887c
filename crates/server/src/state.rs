//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. The `AppState` holds all shared resources, such
//! as the configuration, the persistence gateway, and the instantiated AI
//! provider, making them accessible to all request handlers.

use crate::config::AppConfig;
use kiomate::{
    providers::ai::{gemini::GeminiProvider, local::LocalAiProvider, AiProvider},
    InsightClient, SqliteStore,
};
use std::sync::Arc;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration, loaded from `config.yml`.
    pub config: Arc<AppConfig>,
    /// The insight-generation pipeline over the configured AI provider.
    pub insight_client: Arc<InsightClient>,
    /// The same provider, used directly by the chat flow.
    pub ai_provider: Arc<Box<dyn AiProvider>>,
    /// The persistence gateway for businesses, insights, chat and analytics.
    pub store: Arc<SqliteStore>,
}

/// Builds the shared application state from the configuration.
///
/// This function instantiates the configured AI provider, wires it into the
/// insight client, and sets up the connection to the SQLite database.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let provider_config = &config.provider;
    let ai_provider: Box<dyn AiProvider> = match provider_config.provider.as_str() {
        "gemini" => {
            let api_key = provider_config.api_key.clone().ok_or_else(|| {
                anyhow::anyhow!(
                    "api_key is required for the gemini provider. Please set AI_API_KEY in your .env file."
                )
            })?;
            // If api_url is not provided in config, construct it from the model name.
            let api_url = provider_config.api_url.clone().unwrap_or_else(|| {
                format!(
                    "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
                    provider_config.model_name
                )
            });
            Box::new(GeminiProvider::new(api_url, api_key)?)
        }
        "local" => {
            // For local providers, the URL is always required.
            let api_url = provider_config.api_url.clone().ok_or_else(|| {
                anyhow::anyhow!(
                    "api_url is required for the local provider. Please set LOCAL_AI_API_URL in your .env file."
                )
            })?;
            Box::new(LocalAiProvider::new(
                api_url,
                provider_config.api_key.clone(),
                Some(provider_config.model_name.clone()),
            )?)
        }
        other => {
            return Err(anyhow::anyhow!("Unsupported AI provider type '{other}'"));
        }
    };

    let store = SqliteStore::new(&config.db_url).await?;
    tracing::info!(db_path = %config.db_url, "Initialized local storage (SQLite).");
    // Ensure the database schema is up-to-date on startup.
    store.initialize_schema().await?;

    let insight_client = InsightClient::new(ai_provider.clone());

    Ok(AppState {
        config: Arc::new(config),
        insight_client: Arc::new(insight_client),
        ai_provider: Arc::new(ai_provider),
        store: Arc::new(store),
    })
}
