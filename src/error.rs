//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.
//! Failures from the text-generation provider are classified once, at the
//! adapter boundary, into a [`GenerationErrorKind`] so callers never have to
//! re-parse provider messages.

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("API Key is missing. Please ensure '{0}' is set in your environment.")]
    MissingApiKey(String),

    #[error("Empty response from AI.")]
    EmptyResponse,

    #[error("{0}")]
    Generation(#[from] GenerationError),

    #[error("{0}")]
    Validation(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse category of a failed generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationErrorKind {
    Quota,
    Capacity,
    ModelUnavailable,
    Unknown,
}

impl GenerationErrorKind {
    /// Classify a provider failure. The HTTP status wins when present; the
    /// message is only a best-effort fallback.
    pub fn classify(status: Option<u16>, message: &str) -> Self {
        match status {
            Some(429) => return Self::Quota,
            Some(503) => return Self::Capacity,
            Some(404) => return Self::ModelUnavailable,
            _ => {}
        }

        let lower = message.to_lowercase();
        if lower.contains("out of stock") || lower.contains("overloaded") {
            Self::Capacity
        } else if lower.contains("429")
            || lower.contains("quota")
            || lower.contains("resource_exhausted")
            || lower.contains("too many requests")
        {
            Self::Quota
        } else if lower.contains("404") || lower.contains("not found") {
            Self::ModelUnavailable
        } else {
            Self::Unknown
        }
    }
}

/// A classified provider failure, carrying the original detail for logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationError {
    pub kind: GenerationErrorKind,
    pub detail: String,
}

impl GenerationError {
    pub fn new(kind: GenerationErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn from_status(status: u16, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::new(GenerationErrorKind::classify(Some(status), &detail), detail)
    }

    pub fn from_message(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::new(GenerationErrorKind::classify(None, &detail), detail)
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            GenerationErrorKind::Quota => {
                write!(f, "API Quota exceeded. Please wait a minute and try again.")
            }
            GenerationErrorKind::Capacity => write!(
                f,
                "The model is currently at capacity or 'out of stock' in your region. \
                 Please try again in a few minutes."
            ),
            GenerationErrorKind::ModelUnavailable => write!(
                f,
                "The requested model is not available. Check the configured model name."
            ),
            GenerationErrorKind::Unknown => write!(f, "AI Service Error: {}", self.detail),
        }
    }
}

impl std::error::Error for GenerationError {}
