pub mod client;
pub mod error;
pub mod models;

pub use client::{Capabilities, OpenVoiceClient};
pub use error::OpenVoiceError;
pub use models::{
    BaseSpeakerTts, DirectSynthesis, DirectTts, NeutralSynthesis, SourceSpeaker,
    ToneColorConversion, ToneColorConverter,
};
