//! Error handling for the chat analyzer service

use thiserror::Error;

/// Message returned to callers when the submitted text is blank
pub const EMPTY_TEXT_MESSAGE: &str = "El texto no puede estar vacío";

#[derive(Error, Debug)]
pub enum ChatAnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Error al cargar el modelo: {0}")]
    ModelLoading(String),

    #[error("{0}")]
    Validation(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

impl ChatAnalyzerError {
    pub fn empty_text() -> Self {
        ChatAnalyzerError::Validation(EMPTY_TEXT_MESSAGE.to_string())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ChatAnalyzerError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, ChatAnalyzerError>;

/// Convert task join failures (panicked or cancelled analysis) to our error type
impl From<tokio::task::JoinError> for ChatAnalyzerError {
    fn from(err: tokio::task::JoinError) -> Self {
        ChatAnalyzerError::Processing(err.to_string())
    }
}
