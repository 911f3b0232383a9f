//! Application error types

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    #[error("Provider rate limit: {0}")]
    ProviderLimit(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("API error ({status}): {detail}")]
    Api { status: u16, detail: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// True when the error came from the quote provider reporting an
    /// unknown ticker, as opposed to a transport or payload problem.
    pub fn is_invalid_symbol(&self) -> bool {
        matches!(self, AppError::InvalidSymbol(_))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
