use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::sync::Arc;

use crate::{
    domain::tts::{TtsRequest, TtsResponse, TtsService, TtsServiceApi},
    error::{AppError, AppResult},
    infrastructure::middleware::RequestId,
};

pub struct TtsController {
    tts_service: Arc<TtsService>,
}

impl TtsController {
    pub fn new(tts_service: Arc<TtsService>) -> Self {
        Self { tts_service }
    }

    /// POST /tts - Synthesize text in the caller's voice
    pub async fn synthesize(
        State(controller): State<Arc<TtsController>>,
        Extension(request_id): Extension<RequestId>,
        payload: Result<Json<TtsRequest>, JsonRejection>,
    ) -> AppResult<Json<TtsResponse>> {
        let Json(request) = payload.map_err(|rejection| {
            AppError::BadRequest(format!("invalid request body: {}", rejection.body_text()))
        })?;

        tracing::debug!(request_id = %request_id.0, "Handling TTS request");

        let result = controller
            .tts_service
            .synthesize(request.text, request.embed)
            .await?;

        Ok(Json(TtsResponse {
            audio: STANDARD.encode(&result.audio_data),
        }))
    }
}
