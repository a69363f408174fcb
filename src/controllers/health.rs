use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::tts::TtsService;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(tts_service): State<Arc<TtsService>>) -> impl IntoResponse {
    let strategy = tts_service.strategy();

    if tts_service.backend_available().await {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "strategy": strategy,
                "backend": "available"
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "strategy": strategy,
                "backend": "unavailable"
            })),
        )
    }
}
