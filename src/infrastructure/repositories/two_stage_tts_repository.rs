use super::scratch::ScratchArtifacts;
use super::tts_repository::TtsRepository;
use crate::domain::tts::{SpeakerEmbedding, Waveform};
use crate::infrastructure::openvoice::{
    NeutralSynthesis, OpenVoiceError, SourceSpeaker, ToneColorConversion,
};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

const BASE_SPEAKER: &str = "default";
const BASE_LANGUAGE: &str = "English";
const BASE_SPEED: f32 = 1.0;

/// Strategy B: neutral base-speaker synthesis followed by tone-color transfer.
///
/// The backend stages exchange audio through files, so every request gets its
/// own pair of scratch WAVs that are removed on every exit path.
pub struct TwoStageTtsRepository {
    base_tts: Arc<dyn NeutralSynthesis>,
    converter: Arc<dyn ToneColorConversion>,
    source_se: SourceSpeaker,
    scratch_dir: PathBuf,
    watermark: Option<String>,
}

impl TwoStageTtsRepository {
    pub fn new(
        base_tts: Arc<dyn NeutralSynthesis>,
        converter: Arc<dyn ToneColorConversion>,
        source_se: SourceSpeaker,
        scratch_dir: PathBuf,
        watermark: Option<String>,
    ) -> Self {
        Self {
            base_tts,
            converter,
            source_se,
            scratch_dir,
            watermark,
        }
    }

    async fn run_pipeline(
        &self,
        text: &str,
        embedding: &SpeakerEmbedding,
        artifacts: &ScratchArtifacts,
    ) -> Result<Waveform, OpenVoiceError> {
        // stage 1: base speaker
        self.base_tts
            .tts(
                text,
                artifacts.neutral(),
                BASE_SPEAKER,
                BASE_LANGUAGE,
                BASE_SPEED,
            )
            .await?;

        // stage 2: colour transfer
        self.converter
            .convert(
                artifacts.neutral(),
                &self.source_se,
                embedding,
                artifacts.converted(),
                self.watermark.as_deref(),
            )
            .await?;

        let wav_bytes = tokio::fs::read(artifacts.converted()).await?;
        Ok(Waveform::from_wav_bytes(&wav_bytes)?)
    }
}

#[async_trait]
impl TtsRepository for TwoStageTtsRepository {
    async fn synthesize(
        &self,
        text: &str,
        embedding: &SpeakerEmbedding,
    ) -> Result<Waveform, String> {
        let start_time = std::time::Instant::now();

        let artifacts = ScratchArtifacts::acquire(&self.scratch_dir).map_err(|e| {
            tracing::error!(
                error = %e,
                scratch_dir = %self.scratch_dir.display(),
                "Could not create scratch audio files"
            );
            format!("scratch storage unavailable: {}", e)
        })?;

        let result = self.run_pipeline(text, embedding, &artifacts).await;
        drop(artifacts);

        let waveform = result.map_err(|e| {
            tracing::error!(error = %e, text_length = text.len(), "Two-stage synthesis failed");
            e.to_string()
        })?;

        tracing::debug!(
            strategy = "two_stage",
            sample_count = waveform.samples.len(),
            sample_rate = waveform.sample_rate,
            latency_ms = start_time.elapsed().as_millis(),
            "Two-stage synthesis finished"
        );

        Ok(waveform)
    }

    fn strategy(&self) -> &'static str {
        "two_stage"
    }
}
