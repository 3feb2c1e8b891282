//! Error handling and custom error types
//!
//! Provides unified error handling across the identification pipeline using
//! thiserror. Every variant maps onto an [`ErrorKind`] so the HTTP layer can
//! report a machine-readable category next to the message.

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No image file provided")]
    MissingImage,

    #[error("Gemini API error: {0}")]
    AiProvider(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Failed to parse plant information from AI response")]
    Parse,

    #[error("Incomplete plant information in AI response: {0}")]
    IncompleteResult(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse failure category reported alongside error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Configuration,
    Upstream,
    Timeout,
    Parse,
    IncompleteResult,
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingImage => ErrorKind::Validation,
            Error::Config(_) => ErrorKind::Configuration,
            Error::Http(e) if e.is_timeout() => ErrorKind::Timeout,
            Error::Http(_) | Error::AiProvider(_) => ErrorKind::Upstream,
            Error::Timeout(_) => ErrorKind::Timeout,
            Error::Parse => ErrorKind::Parse,
            Error::IncompleteResult(_) => ErrorKind::IncompleteResult,
            Error::Io(_) => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
