// HTTP request handlers
use crate::application::trend_service::TrendService;
use crate::domain::range::RangeHandle;
use crate::error::TrendError;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::infrastructure::json_mapper::{ErrorDto, frame_to_json, ranking_to_json, summary_to_json};
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct RangeUpdate {
    pub handle: RangeHandle,
    pub percent: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DarkModeDto {
    pub dark_mode: bool,
}

async fn respond<T: Serialize>(status: StatusCode, data: &T, compress: bool) -> Response {
    match json_response(status, data, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

async fn error_response(status: StatusCode, message: String, compress: bool) -> Response {
    respond(status, &ErrorDto { error: message }, compress).await
}

/// Chart endpoints only run once the initial load succeeded
async fn with_trends(state: &AppState, compress: bool) -> Result<&TrendService, Response> {
    match &state.trends {
        Ok(service) => Ok(service),
        Err(message) => Err(error_response(StatusCode::SERVICE_UNAVAILABLE, message.clone(), compress).await),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current chart frame
pub async fn get_chart(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let compress = accepts_brotli(&headers);
    let service = match with_trends(&state, compress).await {
        Ok(service) => service,
        Err(response) => return response,
    };

    let frame = service.frame().await;
    respond(StatusCode::OK, &frame_to_json(frame), compress).await
}

/// Move one timeline handle and return the recomputed frame
pub async fn update_range(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(update): Json<RangeUpdate>,
) -> Response {
    let compress = accepts_brotli(&headers);
    let service = match with_trends(&state, compress).await {
        Ok(service) => service,
        Err(response) => return response,
    };

    let frame = service.drag(update.handle, update.percent).await;
    respond(StatusCode::OK, &frame_to_json(frame), compress).await
}

/// Legend click: show or hide one entity
pub async fn toggle_entity(
    Path(name): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let compress = accepts_brotli(&headers);
    let service = match with_trends(&state, compress).await {
        Ok(service) => service,
        Err(response) => return response,
    };

    match service.toggle_entity(&name).await {
        Ok(frame) => respond(StatusCode::OK, &frame_to_json(frame), compress).await,
        Err(e @ TrendError::UnknownEntity(_)) => {
            error_response(StatusCode::NOT_FOUND, e.to_string(), compress).await
        }
        Err(e) => {
            tracing::error!("Error toggling {}: {}", name, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), compress).await
        }
    }
}

/// Latest-trend ranking
pub async fn get_ranking(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let compress = accepts_brotli(&headers);
    let service = match with_trends(&state, compress).await {
        Ok(service) => service,
        Err(response) => return response,
    };

    let ranking = service.ranking().await;
    respond(StatusCode::OK, &ranking_to_json(ranking), compress).await
}

/// Per-entity statistics over the raw polls
pub async fn get_summary(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let compress = accepts_brotli(&headers);
    let service = match with_trends(&state, compress).await {
        Ok(service) => service,
        Err(response) => return response,
    };

    let summary = service.summary().await;
    respond(StatusCode::OK, &summary_to_json(summary), compress).await
}

/// The computed smoothing in the precomputed payload format
pub async fn get_payload(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let compress = accepts_brotli(&headers);
    let service = match with_trends(&state, compress).await {
        Ok(service) => service,
        Err(response) => return response,
    };

    let payload = service.export_payload().await;
    respond(StatusCode::OK, &payload, compress).await
}

pub async fn get_dark_mode(State(state): State<Arc<AppState>>) -> Response {
    match state.preferences.dark_mode().await {
        Ok(dark_mode) => respond(StatusCode::OK, &DarkModeDto { dark_mode }, false).await,
        Err(e) => {
            tracing::error!("Error reading preferences: {:#}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), false).await
        }
    }
}

pub async fn toggle_dark_mode(State(state): State<Arc<AppState>>) -> Response {
    match state.preferences.toggle_dark_mode().await {
        Ok(dark_mode) => respond(StatusCode::OK, &DarkModeDto { dark_mode }, false).await,
        Err(e) => {
            tracing::error!("Error writing preferences: {:#}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), false).await
        }
    }
}
