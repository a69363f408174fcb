use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voiceclone_tts::controllers::tts::TtsController;
use voiceclone_tts::domain::tts::TtsService;
use voiceclone_tts::infrastructure::config::{Config, LogFormat};
use voiceclone_tts::infrastructure::http::start_http_server;
use voiceclone_tts::infrastructure::openvoice::OpenVoiceClient;
use voiceclone_tts::infrastructure::repositories::{
    OpenVoiceSettings, OpenVoiceTtsRepository, TtsRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting voice clone TTS on {}:{}",
        config.host,
        config.port
    );

    // Load the model once; nothing is served until this succeeds
    tracing::info!(
        worker_url = %config.worker_url,
        openvoice_home = %config.openvoice_home.display(),
        strategy = ?config.strategy,
        "Loading OpenVoice model"
    );
    let start = std::time::Instant::now();

    let client = Arc::new(OpenVoiceClient::new(config.worker_url.clone()));
    let settings = OpenVoiceSettings::from_config(&config);
    let tts_repo = OpenVoiceTtsRepository::initialize(client, &settings)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "OpenVoice model could not be loaded");
            e
        })?;

    tracing::info!(
        strategy = tts_repo.strategy(),
        elapsed_secs = format!("{:.1}", start.elapsed().as_secs_f64()),
        "OpenVoice model ready"
    );

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    let tts_service = Arc::new(TtsService::new(Arc::new(tts_repo)));
    let tts_controller = Arc::new(TtsController::new(tts_service.clone()));

    start_http_server(config, tts_service, tts_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let default_filter = if config.is_development() {
        "voiceclone_tts=debug,tower_http=debug"
    } else {
        "voiceclone_tts=info,tower_http=info"
    };

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
