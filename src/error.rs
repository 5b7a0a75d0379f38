//! Error types for the retirement advisor

use std::time::Duration;
use thiserror::Error;

/// Result type alias for advisor operations
pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {

    // =============================
    // Core Errors
    // =============================

    #[error("Invalid answer: {0}")]
    InvalidAnswer(String),

    #[error("Please complete the questionnaire first!")]
    IncompleteProfile,

    #[error("Calculation error: {0}")]
    Calculation(String),

    #[error("Responder error: {0}")]
    Responder(String),

    #[error("Responder timed out after {0:?}")]
    ResponderTimeout(Duration),

    #[error("Configuration error: {0}")]
    Config(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
