/// Dimension of the tone-color speaker embedding produced by the Embedding Provider
pub const EMBEDDING_DIM: usize = 256;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embed must have length {expected}")]
    WrongLength { expected: usize, actual: usize },
}

/// A validated speaker embedding.
///
/// The values are opaque to this service: they are handed to the model backend as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakerEmbedding(Box<[f32; EMBEDDING_DIM]>);

impl SpeakerEmbedding {
    pub fn as_slice(&self) -> &[f32] {
        self.0.as_slice()
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.0.to_vec()
    }
}

impl TryFrom<Vec<f32>> for SpeakerEmbedding {
    type Error = EmbeddingError;

    fn try_from(values: Vec<f32>) -> Result<Self, Self::Error> {
        let actual = values.len();
        let boxed: Box<[f32; EMBEDDING_DIM]> = values
            .into_boxed_slice()
            .try_into()
            .map_err(|_| EmbeddingError::WrongLength {
                expected: EMBEDDING_DIM,
                actual,
            })?;
        Ok(Self(boxed))
    }
}
