//! Error types for rendering and file output

use barsmith_core::BarsmithError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Core(#[from] BarsmithError),
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid render settings: {0}")]
    InvalidSettings(String),
    #[error("Expected {expected} input files, got {found}")]
    WrongInputCount { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, RenderError>;
