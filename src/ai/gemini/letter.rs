use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentRequest, GenerateContentResponse, Part, SamplingConfig};
use crate::ai::{require_text, CoverLetterService};
use crate::credentials::CredentialSource;
use crate::models::{CoverLetterInputs, GenerationConfig};
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use std::sync::Arc;

pub const TEMPERATURE: f32 = 0.7;

/// Generates cover letters with a single `generateContent` call per request.
pub struct GeminiCoverLetterClient {
    http: GeminiHttpClient,
    credentials: Arc<dyn CredentialSource>,
}

impl GeminiCoverLetterClient {
    pub fn new(model: String, credentials: Arc<dyn CredentialSource>) -> Self {
        Self::new_with_client(model, credentials, reqwest::Client::new())
    }

    pub fn new_with_client(
        model: String,
        credentials: Arc<dyn CredentialSource>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(model, client),
            credentials,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    pub fn model(&self) -> &str {
        self.http.model()
    }
}

#[async_trait]
impl CoverLetterService for GeminiCoverLetterClient {
    async fn generate_cover_letter(
        &self,
        inputs: &CoverLetterInputs,
        config: &GenerationConfig,
    ) -> Result<String> {
        let api_key = self.credentials.resolve().ok_or_else(|| {
            tracing::warn!("No credential in {}; skipping Gemini call", self.credentials.name());
            Error::MissingApiKey(self.credentials.name().to_string())
        })?;

        let prompt = prompts::build_cover_letter_prompt(inputs, config);
        tracing::debug!(
            "Requesting {}-word {} letter from {} ({} prompt chars)",
            config.length.words(),
            config.style,
            self.http.model(),
            prompt.len()
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: Some(prompt) }],
            }],
            generation_config: SamplingConfig {
                temperature: TEMPERATURE,
            },
        };

        let response: GenerateContentResponse =
            self.http.generate_content(&api_key, &request).await?;

        require_text(response.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::StaticCredentialSource;
    use crate::models::{JobFields, ProfileFields};
    use crate::GenerationErrorKind;
    use wiremock::matchers::{body_partial_json, header, method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
    const GENERATE_CONTENT_PATH_REGEX: &str = r"^/v1beta/models/[^/]+:generateContent$";

    fn make_client(server: &MockServer, api_key: Option<&str>, model: &str) -> GeminiCoverLetterClient {
        let credentials: Arc<dyn CredentialSource> = match api_key {
            Some(key) => Arc::new(StaticCredentialSource::new(key)),
            None => Arc::new(StaticCredentialSource::missing()),
        };
        GeminiCoverLetterClient::new(model.to_string(), credentials).with_base_url(server.uri())
    }

    fn inputs() -> CoverLetterInputs {
        CoverLetterInputs {
            profile: ProfileFields {
                name: "Jane Doe".to_string(),
                recent_position: "Designer".to_string(),
                background: "Shipped a design system.".to_string(),
            },
            job: JobFields {
                company_name: "Acme".to_string(),
                target_position: "Lead Designer".to_string(),
                job_description: "Lead the design team.".to_string(),
            },
        }
    }

    fn text_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        })
    }

    async fn generate_against(status: u16, body: &str) -> Error {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path_regex(GENERATE_CONTENT_PATH_REGEX))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&server)
            .await;

        make_client(&server, Some("test-key"), DEFAULT_MODEL)
            .generate_cover_letter(&inputs(), &GenerationConfig::default())
            .await
            .unwrap_err()
    }

    fn kind_of(err: &Error) -> Option<GenerationErrorKind> {
        match err {
            Error::Generation(e) => Some(e.kind),
            _ => None,
        }
    }

    #[tokio::test]
    async fn test_returns_response_text_verbatim() {
        let server = MockServer::start().await;
        let letter = "Dear Acme Hiring Team,\n\n**I am thrilled**...\n\nSincerely,\nJane Doe\n";

        Mock::given(method("POST"))
            .and(path_regex(GENERATE_CONTENT_PATH_REGEX))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_body(letter)))
            .mount(&server)
            .await;

        let client = make_client(&server, Some("test-key"), DEFAULT_MODEL);
        let text = client
            .generate_cover_letter(&inputs(), &GenerationConfig::default())
            .await
            .unwrap();
        assert_eq!(text, letter);
    }

    #[tokio::test]
    async fn test_sends_key_prompt_and_temperature() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-3-flash-preview:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "generationConfig": { "temperature": 0.7 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_body("letter")))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server, Some("test-key"), "models/gemini-3-flash-preview");
        assert_eq!(client.model(), DEFAULT_MODEL);
        client
            .generate_cover_letter(&inputs(), &GenerationConfig::default())
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("Lead the design team."));
        assert!(prompt.contains("approximately 200 words"));
    }

    #[tokio::test]
    async fn test_missing_credential_skips_network_call() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_body("letter")))
            .expect(0)
            .mount(&server)
            .await;

        let client = make_client(&server, None, DEFAULT_MODEL);
        let err = client
            .generate_cover_letter(&inputs(), &GenerationConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::MissingApiKey(_)));
        assert!(err.to_string().contains("API_KEY"));
    }

    #[tokio::test]
    async fn test_empty_candidates_is_empty_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path_regex(GENERATE_CONTENT_PATH_REGEX))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "candidates": [] })),
            )
            .mount(&server)
            .await;

        let client = make_client(&server, Some("test-key"), DEFAULT_MODEL);
        let err = client
            .generate_cover_letter(&inputs(), &GenerationConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::EmptyResponse));
    }

    #[tokio::test]
    async fn test_rate_limit_is_quota_error() {
        let err = generate_against(429, r#"{"error":{"status":"RESOURCE_EXHAUSTED"}}"#).await;
        assert_eq!(kind_of(&err), Some(GenerationErrorKind::Quota));
        assert!(err.to_string().starts_with("API Quota exceeded"));
    }

    #[tokio::test]
    async fn test_overloaded_is_capacity_error() {
        let err = generate_against(503, r#"{"error":{"message":"The model is overloaded."}}"#).await;
        assert_eq!(kind_of(&err), Some(GenerationErrorKind::Capacity));
    }

    #[tokio::test]
    async fn test_unknown_model_is_model_unavailable() {
        let err = generate_against(404, "models/nope is not found").await;
        assert_eq!(kind_of(&err), Some(GenerationErrorKind::ModelUnavailable));
    }

    #[tokio::test]
    async fn test_other_failures_are_generic_service_errors() {
        let err = generate_against(500, "internal").await;
        assert_eq!(kind_of(&err), Some(GenerationErrorKind::Unknown));
        assert!(err.to_string().starts_with("AI Service Error:"));
        assert!(err.to_string().contains("internal"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_generic_service_error() {
        let err = generate_against(200, "not json").await;
        assert_eq!(kind_of(&err), Some(GenerationErrorKind::Unknown));
    }
}
