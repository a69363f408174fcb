use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error("{0}")]
    Invalid(String),
    #[error("{0}")]
    Inference(String),
    #[error("audio encoding failed: {0}")]
    Encoding(String),
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::Invalid(msg) => AppError::BadRequest(msg),
            TtsServiceError::Inference(msg) => AppError::Inference(msg),
            TtsServiceError::Encoding(msg) => AppError::Inference(msg),
        }
    }
}
