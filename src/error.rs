//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Product analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Ad generation failed: {0}")]
    GenerationFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Share error: {0}")]
    Share(String),
}

pub type Result<T> = std::result::Result<T, Error>;
