pub mod direct_tts_repository;
pub mod openvoice_tts_repository;
pub mod scratch;
pub mod tts_repository;
pub mod two_stage_tts_repository;

pub use direct_tts_repository::DirectTtsRepository;
pub use openvoice_tts_repository::{
    select_strategy, InferenceBackend, OpenVoiceSettings, OpenVoiceTtsRepository, StartupError,
    Strategy,
};
pub use tts_repository::TtsRepository;
pub use two_stage_tts_repository::TwoStageTtsRepository;
