// Route table for the chart front-end
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_chart, get_dark_mode, get_payload, get_ranking, get_summary, health_check, toggle_dark_mode,
    toggle_entity, update_range,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/chart", get(get_chart))
        .route("/range", post(update_range))
        .route("/legend/:name/toggle", post(toggle_entity))
        .route("/ranking", get(get_ranking))
        .route("/summary", get(get_summary))
        .route("/payload", get(get_payload))
        .route("/preferences/dark-mode", get(get_dark_mode).post(toggle_dark_mode))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
