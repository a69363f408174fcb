use serde::{Deserialize, Serialize};

/// Request for POST /tts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsRequest {
    /// Text to synthesise
    pub text: String,
    /// 256-float speaker embedding
    pub embed: Vec<f32>,
}

/// Response for POST /tts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsResponse {
    /// base64-encoded 16 kHz mono PCM-16 WAV
    pub audio: String,
}
