use crate::domain::tts::{SpeakerEmbedding, Waveform};
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the inference strategy the model backend supports.
///
/// Implementations are responsible for:
/// - Driving the backend entry points for their strategy
/// - Returning an in-memory waveform (no artifacts left behind)
/// - Reporting every backend failure as a description string
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize `text` in the voice described by `embedding`
    ///
    /// # Errors
    /// Returns the backend's error text if synthesis fails. Callers must not retry.
    async fn synthesize(
        &self,
        text: &str,
        embedding: &SpeakerEmbedding,
    ) -> Result<Waveform, String>;

    /// Short name of the strategy, for logs and readiness
    fn strategy(&self) -> &'static str;

    /// Cheap reachability check of the backend
    async fn check(&self) -> Result<(), String> {
        Ok(())
    }
}
