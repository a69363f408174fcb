use anyhow::Result;
use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use voiceclone_tts::domain::tts::{Waveform, SAMPLE_RATE};
use voiceclone_tts::infrastructure::openvoice::Capabilities;

/// Stand-in for the OpenVoice model worker.
///
/// Records every call as `(path, body)` and writes real WAV files where the
/// two-stage entry points are asked to produce audio.
#[derive(Default)]
pub struct FakeWorker {
    pub capabilities: Capabilities,
    pub fail_infer: Option<String>,
    pub fail_convert: Option<String>,
    pub fail_load: bool,
    pub calls: Mutex<Vec<(String, Value)>>,
}

#[allow(dead_code)]
impl FakeWorker {
    pub fn direct() -> Self {
        Self {
            capabilities: Capabilities {
                tts: true,
                base_speaker_tts: true,
                tone_color_converter: true,
                cuda: true,
            },
            ..Default::default()
        }
    }

    pub fn two_stage() -> Self {
        Self {
            capabilities: Capabilities {
                tts: false,
                base_speaker_tts: true,
                tone_color_converter: true,
                cuda: false,
            },
            ..Default::default()
        }
    }

    pub fn calls_to(&self, suffix: &str) -> Vec<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(path, _)| path.ends_with(suffix))
            .map(|(_, body)| body.clone())
            .collect()
    }

    fn record(&self, path: String, body: Value) {
        self.calls.lock().unwrap().push((path, body));
    }

    /// Serve on an ephemeral port and return the base URL
    pub async fn start(self: &Arc<Self>) -> Result<String> {
        let app = Router::new()
            .route("/capabilities", get(capabilities))
            .fallback(dispatch)
            .with_state(self.clone());

        super::serve(app).await
    }
}

fn worker_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}

fn write_wav(path: &Value, samples: &[f32]) -> Result<(), String> {
    let path = path.as_str().ok_or("missing path")?;
    let bytes = Waveform::new(samples.to_vec(), SAMPLE_RATE)
        .to_wav_bytes()
        .map_err(|e| e.to_string())?;
    std::fs::write(path, bytes).map_err(|e| e.to_string())
}

async fn capabilities(State(worker): State<Arc<FakeWorker>>) -> Json<Capabilities> {
    worker.record("/capabilities".to_string(), Value::Null);
    Json(worker.capabilities)
}

async fn dispatch(
    State(worker): State<Arc<FakeWorker>>,
    uri: Uri,
    Json(body): Json<Value>,
) -> Response {
    let path = uri.path().to_string();
    worker.record(path.clone(), body.clone());

    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    match segments.as_slice() {
        [kind, "load"] => {
            if worker.fail_load {
                return worker_error("checkpoint not found");
            }
            Json(json!({ "handle": format!("{}-1", kind) })).into_response()
        }
        [_, _, "checkpoint"] => Json(json!({})).into_response(),
        ["tts", _, "infer"] => match &worker.fail_infer {
            Some(message) => worker_error(message),
            None => Json(json!({ "samples": vec![0.1f32; 1_600], "sample_rate": SAMPLE_RATE }))
                .into_response(),
        },
        ["base_speaker_tts", _, "tts"] => match write_wav(&body["output_path"], &[0.1; 800]) {
            Ok(()) => Json(json!({})).into_response(),
            Err(e) => worker_error(&e),
        },
        ["tone_color_converter", _, "convert"] => {
            if let Some(message) = &worker.fail_convert {
                // leave a half-written artifact behind, like a crash mid-conversion
                let _ = write_wav(&body["output_path"], &[0.2; 10]);
                return worker_error(message);
            }
            match write_wav(&body["output_path"], &[0.2; 1_600]) {
                Ok(()) => Json(json!({})).into_response(),
                Err(e) => worker_error(&e),
            }
        }
        _ => (StatusCode::NOT_FOUND, Json(json!({ "error": "no such entry point" }))).into_response(),
    }
}
