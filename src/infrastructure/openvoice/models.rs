use super::client::OpenVoiceClient;
use super::error::OpenVoiceError;
use crate::domain::tts::{SpeakerEmbedding, Waveform};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

const BASE_SPEAKER_TTS: &str = "base_speaker_tts";
const TONE_COLOR_CONVERTER: &str = "tone_color_converter";

/// One-call synthesis: text and target speaker in, waveform out
#[async_trait]
pub trait DirectSynthesis: Send + Sync {
    async fn infer(
        &self,
        text: &str,
        embedding: &SpeakerEmbedding,
        language: &str,
    ) -> Result<Waveform, OpenVoiceError>;
}

/// Renders text in a stock voice into a WAV file at `output_path`
#[async_trait]
pub trait NeutralSynthesis: Send + Sync {
    async fn tts(
        &self,
        text: &str,
        output_path: &Path,
        speaker: &str,
        language: &str,
        speed: f32,
    ) -> Result<(), OpenVoiceError>;
}

/// Re-voices the WAV at `audio_src_path` from `src_se` to `tgt_se`, writing `output_path`
#[async_trait]
pub trait ToneColorConversion: Send + Sync {
    async fn convert(
        &self,
        audio_src_path: &Path,
        src_se: &SourceSpeaker,
        tgt_se: &SpeakerEmbedding,
        output_path: &Path,
        message: Option<&str>,
    ) -> Result<(), OpenVoiceError>;
}

/// The `openvoice.api.TTS` wrapper loaded on the worker
pub struct DirectTts {
    client: Arc<OpenVoiceClient>,
    handle: String,
}

impl DirectTts {
    pub async fn load(
        client: Arc<OpenVoiceClient>,
        checkpoint_root: &Path,
        device: &str,
    ) -> Result<Self, OpenVoiceError> {
        let handle = client.load_tts(checkpoint_root, device).await?;
        tracing::info!(
            handle = %handle,
            checkpoint_root = %checkpoint_root.display(),
            device = device,
            "OpenVoice TTS wrapper loaded"
        );
        Ok(Self { client, handle })
    }
}

#[async_trait]
impl DirectSynthesis for DirectTts {
    async fn infer(
        &self,
        text: &str,
        embedding: &SpeakerEmbedding,
        language: &str,
    ) -> Result<Waveform, OpenVoiceError> {
        let response = self
            .client
            .infer(&self.handle, text, embedding.as_slice(), language)
            .await?;
        Ok(Waveform::new(response.samples, response.sample_rate))
    }
}

/// `BaseSpeakerTTS` with its checkpoint loaded
pub struct BaseSpeakerTts {
    client: Arc<OpenVoiceClient>,
    handle: String,
}

impl BaseSpeakerTts {
    pub async fn load(
        client: Arc<OpenVoiceClient>,
        config_path: &Path,
        checkpoint_path: &Path,
        device: &str,
    ) -> Result<Self, OpenVoiceError> {
        let handle = client.load_base_speaker_tts(config_path, device).await?;
        client
            .load_checkpoint(BASE_SPEAKER_TTS, &handle, checkpoint_path)
            .await?;
        tracing::info!(
            handle = %handle,
            checkpoint = %checkpoint_path.display(),
            "Base speaker TTS loaded"
        );
        Ok(Self { client, handle })
    }
}

#[async_trait]
impl NeutralSynthesis for BaseSpeakerTts {
    async fn tts(
        &self,
        text: &str,
        output_path: &Path,
        speaker: &str,
        language: &str,
        speed: f32,
    ) -> Result<(), OpenVoiceError> {
        self.client
            .base_speaker_tts(&self.handle, text, output_path, speaker, language, speed)
            .await
    }
}

/// `ToneColorConverter` with its checkpoint loaded
pub struct ToneColorConverter {
    client: Arc<OpenVoiceClient>,
    handle: String,
}

impl ToneColorConverter {
    pub async fn load(
        client: Arc<OpenVoiceClient>,
        config_path: &Path,
        checkpoint_path: &Path,
        device: &str,
    ) -> Result<Self, OpenVoiceError> {
        let handle = client.load_tone_color_converter(config_path, device).await?;
        client
            .load_checkpoint(TONE_COLOR_CONVERTER, &handle, checkpoint_path)
            .await?;
        tracing::info!(
            handle = %handle,
            checkpoint = %checkpoint_path.display(),
            "Tone color converter loaded"
        );
        Ok(Self { client, handle })
    }
}

#[async_trait]
impl ToneColorConversion for ToneColorConverter {
    async fn convert(
        &self,
        audio_src_path: &Path,
        src_se: &SourceSpeaker,
        tgt_se: &SpeakerEmbedding,
        output_path: &Path,
        message: Option<&str>,
    ) -> Result<(), OpenVoiceError> {
        self.client
            .convert(
                &self.handle,
                audio_src_path,
                src_se.handle(),
                tgt_se.as_slice(),
                output_path,
                message,
            )
            .await
    }
}

/// A speaker characteristic resident on the worker, e.g. `en_default_se.pth`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpeaker(String);

impl SourceSpeaker {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub async fn load(
        client: &OpenVoiceClient,
        path: &Path,
        device: &str,
    ) -> Result<Self, OpenVoiceError> {
        let handle = client.load_speaker_embedding(path, device).await?;
        tracing::info!(handle = %handle, path = %path.display(), "Source speaker loaded");
        Ok(Self(handle))
    }

    pub fn handle(&self) -> &str {
        &self.0
    }
}
