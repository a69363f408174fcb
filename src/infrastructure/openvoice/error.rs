#[derive(Debug, thiserror::Error)]
pub enum OpenVoiceError {
    #[error("model worker request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("audio artifact I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid WAV artifact: {0}")]
    Wav(#[from] hound::Error),
}

impl OpenVoiceError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            status: 500,
            message: message.into(),
        }
    }
}
