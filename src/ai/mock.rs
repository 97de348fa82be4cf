use super::{require_text, CoverLetterService};
use crate::models::{CoverLetterInputs, GenerationConfig};
use crate::{GenerationError, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
enum MockReply {
    Text(String),
    Failure(String),
}

/// Scripted stand-in for the generation provider.
///
/// Replies are served in order and cycle once exhausted. Failures are
/// classified from their message exactly as the real adapter does.
#[derive(Clone)]
pub struct MockCoverLetterClient {
    replies: Arc<Mutex<Vec<(MockReply, Option<Duration>)>>>,
    requests: Arc<Mutex<Vec<(CoverLetterInputs, GenerationConfig)>>>,
}

impl MockCoverLetterClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.push(MockReply::Text(text.into()), None)
    }

    /// Like [`with_response`](Self::with_response) but the reply only
    /// resolves after `delay`.
    pub fn with_delayed_response(self, text: impl Into<String>, delay: Duration) -> Self {
        self.push(MockReply::Text(text.into()), Some(delay))
    }

    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.push(MockReply::Failure(message.into()), None)
    }

    fn push(self, reply: MockReply, delay: Option<Duration>) -> Self {
        self.replies.lock().unwrap().push((reply, delay));
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Inputs and config of every call received so far.
    pub fn get_requests(&self) -> Vec<(CoverLetterInputs, GenerationConfig)> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockCoverLetterClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CoverLetterService for MockCoverLetterClient {
    async fn generate_cover_letter(
        &self,
        inputs: &CoverLetterInputs,
        config: &GenerationConfig,
    ) -> Result<String> {
        let scripted = {
            let mut requests = self.requests.lock().unwrap();
            requests.push((inputs.clone(), *config));
            let index = requests.len() - 1;

            let replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                None
            } else {
                Some(replies[index % replies.len()].clone())
            }
        };

        let Some((reply, delay)) = scripted else {
            // Default mock response
            return Ok(format!(
                "Dear Hiring Manager,\n\nI am applying for the {} role.\n\nSincerely,\n{}",
                inputs.job.target_position, inputs.profile.name
            ));
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match reply {
            MockReply::Text(text) => require_text(Some(text)),
            MockReply::Failure(message) => Err(GenerationError::from_message(message).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, GenerationErrorKind};

    #[tokio::test]
    async fn test_mock_default_response_mentions_position() {
        let client = MockCoverLetterClient::new();
        let mut inputs = CoverLetterInputs::default();
        inputs.job.target_position = "Lead Designer".to_string();

        let text = client
            .generate_cover_letter(&inputs, &GenerationConfig::default())
            .await
            .unwrap();
        assert!(text.contains("Lead Designer"));
    }

    #[tokio::test]
    async fn test_mock_custom_responses_cycle() {
        let client = MockCoverLetterClient::new()
            .with_response("Letter 1")
            .with_response("Letter 2");
        let inputs = CoverLetterInputs::default();
        let config = GenerationConfig::default();

        assert_eq!(client.generate_cover_letter(&inputs, &config).await.unwrap(), "Letter 1");
        assert_eq!(client.generate_cover_letter(&inputs, &config).await.unwrap(), "Letter 2");
        // Should cycle back
        assert_eq!(client.generate_cover_letter(&inputs, &config).await.unwrap(), "Letter 1");
        assert_eq!(client.get_call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_failure_is_classified() {
        let client = MockCoverLetterClient::new().with_failure("HTTP 429 Too Many Requests");
        let err = client
            .generate_cover_letter(&CoverLetterInputs::default(), &GenerationConfig::default())
            .await
            .unwrap_err();

        match err {
            Error::Generation(e) => assert_eq!(e.kind, GenerationErrorKind::Quota),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_mock_empty_response_is_rejected() {
        let client = MockCoverLetterClient::new().with_response("");
        let err = client
            .generate_cover_letter(&CoverLetterInputs::default(), &GenerationConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::EmptyResponse));
    }
}
