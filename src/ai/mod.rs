//! AI service integration for cover-letter generation
//!
//! Provides the [`CoverLetterService`] seam plus a Gemini-backed
//! implementation and an in-memory mock.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiCoverLetterClient;
pub use mock::MockCoverLetterClient;

use crate::models::{CoverLetterInputs, GenerationConfig};
use crate::{Error, Result};
use async_trait::async_trait;

#[async_trait]
pub trait CoverLetterService: Send + Sync {
    /// Produce the letter text for the given form values. The text is
    /// returned exactly as the provider produced it.
    async fn generate_cover_letter(
        &self,
        inputs: &CoverLetterInputs,
        config: &GenerationConfig,
    ) -> Result<String>;
}

/// Reject absent or whitespace-only provider output.
pub(crate) fn require_text(text: Option<String>) -> Result<String> {
    match text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(Error::EmptyResponse),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_keeps_text_verbatim() {
        let text = "  Dear team,\n\n**Hello**\n".to_string();
        assert_eq!(require_text(Some(text.clone())).unwrap(), text);
    }

    #[test]
    fn test_require_text_rejects_empty() {
        assert!(matches!(require_text(None), Err(Error::EmptyResponse)));
        assert!(matches!(
            require_text(Some(" \n".to_string())),
            Err(Error::EmptyResponse)
        ));
    }
}
