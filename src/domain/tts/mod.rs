pub mod dto;
pub mod embedding;
pub mod error;
pub mod service;
pub mod waveform;

pub use dto::{TtsRequest, TtsResponse};
pub use embedding::{EmbeddingError, SpeakerEmbedding, EMBEDDING_DIM};
pub use error::TtsServiceError;
pub use service::{TtsService, TtsServiceApi};
pub use waveform::{Waveform, SAMPLE_RATE};
