use super::embedding::{SpeakerEmbedding, EMBEDDING_DIM};
use super::error::TtsServiceError;
use super::waveform::SAMPLE_RATE;
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct TtsSynthesisResult {
    /// Complete WAV container (16 kHz, mono, PCM-16)
    pub audio_data: Vec<u8>,
    pub sample_count: usize,
    pub duration_secs: f32,
}

pub struct TtsService {
    tts_repo: Arc<dyn TtsRepository>,
}

impl TtsService {
    pub fn new(tts_repo: Arc<dyn TtsRepository>) -> Self {
        Self { tts_repo }
    }

    /// Name of the inference strategy selected at startup
    pub fn strategy(&self) -> &'static str {
        self.tts_repo.strategy()
    }

    /// Whether the model backend is currently reachable
    pub async fn backend_available(&self) -> bool {
        self.tts_repo.check().await.is_ok()
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Synthesize text in the voice described by `embed`
    ///
    /// This operation:
    /// - Rejects blank text and embeddings that are not exactly 256 long
    /// - Runs the inference strategy selected at startup
    /// - Encodes the waveform as a 16 kHz mono PCM-16 WAV
    ///
    /// The backend is never called for invalid input.
    async fn synthesize(
        &self,
        text: String,
        embed: Vec<f32>,
    ) -> Result<TtsSynthesisResult, TtsServiceError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn synthesize(
        &self,
        text: String,
        embed: Vec<f32>,
    ) -> Result<TtsSynthesisResult, TtsServiceError> {
        tracing::info!(
            text_length = text.len(),
            embed_length = embed.len(),
            "TTS synthesis request"
        );

        // 1. Validate input, in order
        if text.trim().is_empty() {
            return Err(TtsServiceError::Invalid("text is empty".to_string()));
        }
        let embedding = SpeakerEmbedding::try_from(embed)
            .map_err(|e| TtsServiceError::Invalid(e.to_string()))?;

        // 2. Run inference
        let start_time = std::time::Instant::now();
        let waveform = self
            .tts_repo
            .synthesize(&text, &embedding)
            .await
            .map_err(TtsServiceError::Inference)?;

        if waveform.sample_rate != SAMPLE_RATE {
            tracing::warn!(
                sample_rate = waveform.sample_rate,
                expected = SAMPLE_RATE,
                "Backend waveform sample rate differs from output rate"
            );
        }

        // 3. Encode WAV
        let audio_data = waveform
            .to_wav_bytes()
            .map_err(|e| TtsServiceError::Encoding(e.to_string()))?;

        tracing::info!(
            strategy = self.tts_repo.strategy(),
            embedding_dim = EMBEDDING_DIM,
            sample_count = waveform.samples.len(),
            audio_size_bytes = audio_data.len(),
            latency_ms = start_time.elapsed().as_millis(),
            "TTS synthesis completed"
        );

        Ok(TtsSynthesisResult {
            audio_data,
            sample_count: waveform.samples.len(),
            duration_secs: waveform.duration_secs(),
        })
    }
}
