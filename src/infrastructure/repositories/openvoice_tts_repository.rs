use super::direct_tts_repository::DirectTtsRepository;
use super::tts_repository::TtsRepository;
use super::two_stage_tts_repository::TwoStageTtsRepository;
use crate::domain::tts::{SpeakerEmbedding, Waveform};
use crate::infrastructure::config::{Config, StrategyPreference};
use crate::infrastructure::openvoice::{
    BaseSpeakerTts, Capabilities, DirectTts, OpenVoiceClient, OpenVoiceError, SourceSpeaker,
    ToneColorConverter,
};
use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Inference strategy chosen once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Direct,
    TwoStage,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Direct => "direct",
            Strategy::TwoStage => "two_stage",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("OpenVoice capability probe failed: {0}")]
    Probe(#[source] OpenVoiceError),

    #[error("OpenVoice worker offers neither the TTS wrapper nor BaseSpeakerTTS + ToneColorConverter")]
    NoStrategy,

    #[error("TTS_STRATEGY={0} requested but the OpenVoice worker does not offer it")]
    Unavailable(Strategy),

    #[error("failed to load {strategy} models: {source}")]
    Load {
        strategy: Strategy,
        #[source]
        source: OpenVoiceError,
    },

    #[error("scratch directory {path} unusable: {source}")]
    Scratch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Everything needed to build the inference adapter
#[derive(Debug, Clone)]
pub struct OpenVoiceSettings {
    /// Checkpoint root (`OPENVOICE_HOME`)
    pub root: PathBuf,
    pub device: Option<String>,
    pub strategy: StrategyPreference,
    pub scratch_dir: PathBuf,
    pub watermark: Option<String>,
}

impl OpenVoiceSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            root: config.openvoice_home.clone(),
            device: config.device.clone(),
            strategy: config.strategy,
            scratch_dir: config.scratch_dir.clone(),
            watermark: config.watermark.clone(),
        }
    }

    fn base_speaker_dir(&self) -> PathBuf {
        self.root.join("base_speakers").join("EN")
    }

    fn converter_dir(&self) -> PathBuf {
        self.root.join("converter")
    }
}

/// Decide the strategy from configuration and what the worker offers
pub fn select_strategy(
    preference: StrategyPreference,
    capabilities: &Capabilities,
) -> Result<Strategy, StartupError> {
    match preference {
        StrategyPreference::Auto if capabilities.tts => Ok(Strategy::Direct),
        StrategyPreference::Auto if capabilities.supports_two_stage() => Ok(Strategy::TwoStage),
        StrategyPreference::Auto => Err(StartupError::NoStrategy),
        StrategyPreference::Direct if capabilities.tts => Ok(Strategy::Direct),
        StrategyPreference::Direct => Err(StartupError::Unavailable(Strategy::Direct)),
        StrategyPreference::TwoStage if capabilities.supports_two_stage() => {
            Ok(Strategy::TwoStage)
        }
        StrategyPreference::TwoStage => Err(StartupError::Unavailable(Strategy::TwoStage)),
    }
}

/// Configured device, otherwise CUDA when the worker has it
pub fn resolve_device(configured: Option<&str>, capabilities: &Capabilities) -> String {
    match configured {
        Some(device) => device.to_string(),
        None if capabilities.cuda => "cuda".to_string(),
        None => "cpu".to_string(),
    }
}

/// The two interchangeable inference strategies
pub enum InferenceBackend {
    Direct(DirectTtsRepository),
    TwoStage(TwoStageTtsRepository),
}

impl InferenceBackend {
    fn as_repository(&self) -> &dyn TtsRepository {
        match self {
            InferenceBackend::Direct(repo) => repo,
            InferenceBackend::TwoStage(repo) => repo,
        }
    }
}

/// OpenVoice implementation of the TTS repository.
///
/// Built once during startup; the models it references stay loaded on the
/// worker for the life of the process and are shared by all requests.
pub struct OpenVoiceTtsRepository {
    client: Arc<OpenVoiceClient>,
    backend: InferenceBackend,
}

impl OpenVoiceTtsRepository {
    pub fn new(client: Arc<OpenVoiceClient>, backend: InferenceBackend) -> Self {
        Self { client, backend }
    }

    /// Probe the worker, pick a strategy and load its checkpoints
    ///
    /// # Errors
    /// Any error here is fatal: the service must not start serving.
    pub async fn initialize(
        client: Arc<OpenVoiceClient>,
        settings: &OpenVoiceSettings,
    ) -> Result<Self, StartupError> {
        let capabilities = client.capabilities().await.map_err(StartupError::Probe)?;
        tracing::info!(
            worker_url = client.base_url(),
            tts = capabilities.tts,
            base_speaker_tts = capabilities.base_speaker_tts,
            tone_color_converter = capabilities.tone_color_converter,
            cuda = capabilities.cuda,
            "OpenVoice worker capabilities"
        );

        let strategy = select_strategy(settings.strategy, &capabilities)?;
        let device = resolve_device(settings.device.as_deref(), &capabilities);

        let backend = match strategy {
            Strategy::Direct => {
                tracing::info!(device = %device, "Using OpenVoice TTS wrapper");
                Self::load_direct(client.clone(), settings, &device)
                    .await
                    .map(InferenceBackend::Direct)
            }
            Strategy::TwoStage => {
                tracing::info!(
                    device = %device,
                    "TTS wrapper absent, falling back to BaseSpeakerTTS + ToneColorConverter"
                );
                Self::prepare_scratch_dir(settings).await?;
                Self::load_two_stage(client.clone(), settings, &device)
                    .await
                    .map(InferenceBackend::TwoStage)
            }
        }
        .map_err(|source| StartupError::Load { strategy, source })?;

        Ok(Self::new(client, backend))
    }

    pub fn backend(&self) -> &InferenceBackend {
        &self.backend
    }

    async fn load_direct(
        client: Arc<OpenVoiceClient>,
        settings: &OpenVoiceSettings,
        device: &str,
    ) -> Result<DirectTtsRepository, OpenVoiceError> {
        let model = DirectTts::load(client, &settings.root, device).await?;
        Ok(DirectTtsRepository::new(Arc::new(model)))
    }

    async fn load_two_stage(
        client: Arc<OpenVoiceClient>,
        settings: &OpenVoiceSettings,
        device: &str,
    ) -> Result<TwoStageTtsRepository, OpenVoiceError> {
        let base_dir = settings.base_speaker_dir();
        let converter_dir = settings.converter_dir();

        let base_tts = BaseSpeakerTts::load(
            client.clone(),
            &base_dir.join("config.json"),
            &base_dir.join("checkpoint.pth"),
            device,
        )
        .await?;

        let converter = ToneColorConverter::load(
            client.clone(),
            &converter_dir.join("config.json"),
            &converter_dir.join("checkpoint.pth"),
            device,
        )
        .await?;

        let source_se =
            SourceSpeaker::load(&client, &base_dir.join("en_default_se.pth"), device).await?;

        Ok(TwoStageTtsRepository::new(
            Arc::new(base_tts),
            Arc::new(converter),
            source_se,
            settings.scratch_dir.clone(),
            settings.watermark.clone(),
        ))
    }

    async fn prepare_scratch_dir(settings: &OpenVoiceSettings) -> Result<(), StartupError> {
        tokio::fs::create_dir_all(&settings.scratch_dir)
            .await
            .map_err(|source| StartupError::Scratch {
                path: settings.scratch_dir.clone(),
                source,
            })
    }
}

#[async_trait]
impl TtsRepository for OpenVoiceTtsRepository {
    async fn synthesize(
        &self,
        text: &str,
        embedding: &SpeakerEmbedding,
    ) -> Result<Waveform, String> {
        self.backend.as_repository().synthesize(text, embedding).await
    }

    fn strategy(&self) -> &'static str {
        self.backend.as_repository().strategy()
    }

    async fn check(&self) -> Result<(), String> {
        self.client
            .capabilities()
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
