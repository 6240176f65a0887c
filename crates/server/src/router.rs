use super::{handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/locations", get(handlers::locations_handler))
        .route("/insights/generate", post(handlers::generate_insights_handler))
        .route("/chat", post(handlers::chat_handler))
        .route("/business/save", post(handlers::save_business_handler))
        .route("/business/{business_id}", get(handlers::get_business_handler))
        .route(
            "/business/{business_id}/insights",
            get(handlers::business_insights_handler),
        )
        .route(
            "/analytics/summary",
            get(handlers::analytics_summary_handler),
        )
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
