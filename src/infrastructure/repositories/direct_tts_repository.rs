use super::tts_repository::TtsRepository;
use crate::domain::tts::{SpeakerEmbedding, Waveform};
use crate::infrastructure::openvoice::DirectSynthesis;
use async_trait::async_trait;
use std::sync::Arc;

/// Language code the one-step wrapper expects
const LANGUAGE: &str = "en";

/// Strategy A: a single backend call returns the waveform
pub struct DirectTtsRepository {
    model: Arc<dyn DirectSynthesis>,
}

impl DirectTtsRepository {
    pub fn new(model: Arc<dyn DirectSynthesis>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl TtsRepository for DirectTtsRepository {
    async fn synthesize(
        &self,
        text: &str,
        embedding: &SpeakerEmbedding,
    ) -> Result<Waveform, String> {
        let start_time = std::time::Instant::now();

        let waveform = self
            .model
            .infer(text, embedding, LANGUAGE)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, text_length = text.len(), "OpenVoice infer failed");
                e.to_string()
            })?;

        tracing::debug!(
            strategy = "direct",
            sample_count = waveform.samples.len(),
            latency_ms = start_time.elapsed().as_millis(),
            "Direct synthesis finished"
        );

        Ok(waveform)
    }

    fn strategy(&self) -> &'static str {
        "direct"
    }
}
