//! # Common Test Utilities
//!
//! This module centralizes the test harness used across the `kiomate-server`
//! integration tests:
//!
//! - `TestApp`: a full application harness that spawns the real server on a
//!   random port with a temporary SQLite database, configured so the AI
//!   provider points at an `httpmock::MockServer` instead of a live API.

// Allow unused code because this is a test utility module, and not all
// functions might be used by every test file that includes it.
#![allow(unused)]

use anyhow::Result;
use httpmock::MockServer;
use kiomate::SqliteStore;
use kiomate_server::{config, router, state::build_app_state, state::AppState};
use reqwest::Client;
use std::{fs::File, io::Write, net::SocketAddr};
use tempfile::{tempdir, NamedTempFile, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};

/// The path the mock Gemini endpoint is served under.
pub const MOCK_GEMINI_PATH: &str = "/v1beta/models/gemini-mock:generateContent";

/// The path the mock OpenAI-compatible endpoint is served under.
pub const MOCK_OPENAI_PATH: &str = "/v1/chat/completions";

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub app_state: AppState,
    _db_file: NamedTempFile,
    _config_dir: TempDir,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the application server backed by the Gemini provider.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with_provider("gemini").await
    }

    /// Spawns the application server backed by the OpenAI-compatible
    /// `local` provider.
    pub async fn spawn_local() -> Result<Self> {
        Self::spawn_with_provider("local").await
    }

    async fn spawn_with_provider(provider: &str) -> Result<Self> {
        dotenvy::dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start();
        let db_file = NamedTempFile::new()?;
        let db_path = db_file.path().to_path_buf();

        let provider_block = match provider {
            "local" => format!(
                r#"provider:
  provider: "local"
  api_url: "{}"
  model_name: "local-mock""#,
                mock_server.url(MOCK_OPENAI_PATH),
            ),
            _ => format!(
                r#"provider:
  provider: "gemini"
  api_url: "{}"
  api_key: "test-api-key"
  model_name: "gemini-mock""#,
                mock_server.url(MOCK_GEMINI_PATH),
            ),
        };

        let config_dir = tempdir()?;
        let config_path = config_dir.path().join("config.yml");
        let config_content = format!(
            "port: 0\ndb_url: \"{}\"\n{provider_block}\n",
            db_path.to_str().unwrap(),
        );
        let mut file = File::create(&config_path)?;
        file.write_all(config_content.as_bytes())?;

        let config = config::get_config(Some(config_path.to_str().unwrap()))?;
        let app_state = build_app_state(config).await?;
        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {e}");
            }
        });

        // Give the server a moment to start.
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            app_state: app_state_for_harness,
            _db_file: db_file,
            _config_dir: config_dir,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Direct store access for seeding and asserting persisted state.
    pub fn store(&self) -> &SqliteStore {
        &self.app_state.store
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

// --- Mock Data Helpers ---

/// A minimal valid set of insight fields for seeding the store.
pub fn sample_insight_fields() -> kiomate::types::InsightFields {
    kiomate::types::InsightFields {
        customer_profile: "Young professionals and students".to_string(),
        peak_hours: "9am-6pm".to_string(),
        pricing_strategy: "Mid-range with weekday bundles".to_string(),
        quick_wins: vec![
            "Open an hour earlier".to_string(),
            "Offer transfer payments".to_string(),
            "Put up clearer signage".to_string(),
        ],
        competition_insight: "Three similar shops within walking distance".to_string(),
        growth_opportunity: "Weekend delivery within the area".to_string(),
        data_sources: None,
        data_note: None,
    }
}

/// A registered business for seeding the store.
pub fn sample_business(business_id: &str) -> kiomate::types::BusinessRecord {
    kiomate::types::BusinessRecord {
        business_id: business_id.to_string(),
        business_name: "Tunde's Fashion Store".to_string(),
        business_type: "Fashion".to_string(),
        location: "Ikeja".to_string(),
        area: None,
        contact: None,
        created_at: chrono::Utc::now(),
        last_active: None,
    }
}
