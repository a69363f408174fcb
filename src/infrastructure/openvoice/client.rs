use super::error::OpenVoiceError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::Path;

/// Entry points the worker exposes, reported once at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// One-step `openvoice.api.TTS` wrapper
    #[serde(default)]
    pub tts: bool,
    #[serde(default)]
    pub base_speaker_tts: bool,
    #[serde(default)]
    pub tone_color_converter: bool,
    #[serde(default)]
    pub cuda: bool,
}

impl Capabilities {
    pub fn supports_two_stage(&self) -> bool {
        self.base_speaker_tts && self.tone_color_converter
    }
}

#[derive(Debug, Serialize)]
struct LoadTtsRequest<'a> {
    checkpoint_root: &'a Path,
    device: &'a str,
}

#[derive(Debug, Serialize)]
struct InferRequest<'a> {
    text: &'a str,
    speaker_embedding: &'a [f32],
    language: &'a str,
}

#[derive(Debug, Serialize)]
struct LoadModelRequest<'a> {
    config_path: &'a Path,
    device: &'a str,
}

#[derive(Debug, Serialize)]
struct CheckpointRequest<'a> {
    checkpoint_path: &'a Path,
}

#[derive(Debug, Serialize)]
struct BaseSpeakerTtsRequest<'a> {
    text: &'a str,
    output_path: &'a Path,
    speaker: &'a str,
    language: &'a str,
    speed: f32,
}

#[derive(Debug, Serialize)]
struct ConvertRequest<'a> {
    audio_src_path: &'a Path,
    src_se: &'a str,
    tgt_se: &'a [f32],
    output_path: &'a Path,
    message: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct LoadSpeakerEmbeddingRequest<'a> {
    path: &'a Path,
    device: &'a str,
}

#[derive(Debug, Deserialize)]
struct HandleResponse {
    handle: String,
}

#[derive(Debug, Deserialize)]
pub struct InferResponse {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for the OpenVoice model worker.
///
/// The worker owns device placement and the loaded weights; this client only
/// holds opaque handles to them. Paths sent to the worker must be valid on the
/// worker's filesystem.
pub struct OpenVoiceClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl OpenVoiceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /capabilities
    pub async fn capabilities(&self) -> Result<Capabilities, OpenVoiceError> {
        let response = self
            .http_client
            .get(format!("{}/capabilities", self.base_url))
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Load the one-step wrapper with its checkpoint root
    pub async fn load_tts(
        &self,
        checkpoint_root: &Path,
        device: &str,
    ) -> Result<String, OpenVoiceError> {
        let body = LoadTtsRequest {
            checkpoint_root,
            device,
        };
        let response: HandleResponse = self.post_json("/tts/load", &body).await?;
        Ok(response.handle)
    }

    pub async fn infer(
        &self,
        handle: &str,
        text: &str,
        speaker_embedding: &[f32],
        language: &str,
    ) -> Result<InferResponse, OpenVoiceError> {
        let body = InferRequest {
            text,
            speaker_embedding,
            language,
        };
        self.post_json(&format!("/tts/{}/infer", handle), &body).await
    }

    pub async fn load_base_speaker_tts(
        &self,
        config_path: &Path,
        device: &str,
    ) -> Result<String, OpenVoiceError> {
        let body = LoadModelRequest {
            config_path,
            device,
        };
        let response: HandleResponse = self.post_json("/base_speaker_tts/load", &body).await?;
        Ok(response.handle)
    }

    pub async fn base_speaker_tts(
        &self,
        handle: &str,
        text: &str,
        output_path: &Path,
        speaker: &str,
        language: &str,
        speed: f32,
    ) -> Result<(), OpenVoiceError> {
        let body = BaseSpeakerTtsRequest {
            text,
            output_path,
            speaker,
            language,
            speed,
        };
        self.post_unit(&format!("/base_speaker_tts/{}/tts", handle), &body)
            .await
    }

    pub async fn load_tone_color_converter(
        &self,
        config_path: &Path,
        device: &str,
    ) -> Result<String, OpenVoiceError> {
        let body = LoadModelRequest {
            config_path,
            device,
        };
        let response: HandleResponse =
            self.post_json("/tone_color_converter/load", &body).await?;
        Ok(response.handle)
    }

    pub async fn convert(
        &self,
        handle: &str,
        audio_src_path: &Path,
        src_se: &str,
        tgt_se: &[f32],
        output_path: &Path,
        message: Option<&str>,
    ) -> Result<(), OpenVoiceError> {
        let body = ConvertRequest {
            audio_src_path,
            src_se,
            tgt_se,
            output_path,
            message,
        };
        self.post_unit(&format!("/tone_color_converter/{}/convert", handle), &body)
            .await
    }

    /// Load a checkpoint into a model previously created under `kind`
    pub async fn load_checkpoint(
        &self,
        kind: &str,
        handle: &str,
        checkpoint_path: &Path,
    ) -> Result<(), OpenVoiceError> {
        let body = CheckpointRequest { checkpoint_path };
        self.post_unit(&format!("/{}/{}/checkpoint", kind, handle), &body)
            .await
    }

    /// Load a serialized speaker characteristic (`*_se.pth`) onto the device
    pub async fn load_speaker_embedding(
        &self,
        path: &Path,
        device: &str,
    ) -> Result<String, OpenVoiceError> {
        let body = LoadSpeakerEmbeddingRequest { path, device };
        let response: HandleResponse = self.post_json("/speaker_embeddings/load", &body).await?;
        Ok(response.handle)
    }

    async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, OpenVoiceError> {
        let response = self.send(path, body).await?;
        Self::decode(response).await
    }

    async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), OpenVoiceError> {
        let response = self.send(path, body).await?;
        Self::check_status(response).await.map(|_| ())
    }

    async fn send<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, OpenVoiceError> {
        tracing::debug!(path = path, "Calling OpenVoice worker");

        self.http_client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, path = path, "OpenVoice worker request failed");
                OpenVoiceError::Transport(e)
            })
    }

    async fn decode<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, OpenVoiceError> {
        let response = Self::check_status(response).await?;
        Ok(response.json::<R>().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, OpenVoiceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let message = serde_json::from_str::<ErrorBody>(&error_text)
            .map(|body| body.error)
            .unwrap_or(error_text);

        Err(OpenVoiceError::Backend {
            status: status.as_u16(),
            message: if message.is_empty() {
                format!("worker returned {}", status)
            } else {
                message
            },
        })
    }
}
