use thiserror::Error;

use crate::audio::ValidationError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Voice profile not found")]
    ProfileNotFound,
    #[error("Audio decode error: {0}")]
    AudioDecode(String),
    #[error("Synthesis error: {0}")]
    Synthesis(String),
}
