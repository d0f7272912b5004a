//! Gemini Completion Provider
//!
//! Implementation of `CompletionProvider` against the Google
//! generative-language REST API (`models/{model}:generateContent`).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use nerd_core::{ChatError, CompletionProvider, CompletionRequest, Result, Role};

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-05-20";

/// API root used when none is configured
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini provider configuration
///
/// The API key travels as a URL query parameter; it is injected here at
/// construction and never read ambiently by the controller.
#[derive(Clone, Debug)]
pub struct GeminiConfig {
    /// API key passed as the `key` query parameter
    pub api_key: String,

    /// Model identifier
    pub model: String,

    /// API root URL
    pub base_url: String,
}

impl GeminiConfig {
    /// Configuration with the default model and API root
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
        }
    }

    /// Read configuration from `GEMINI_API_KEY` / `GEMINI_MODEL`
    pub fn from_env() -> Self {
        let mut config = Self::new(std::env::var("GEMINI_API_KEY").unwrap_or_default());
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            config.model = model;
        }
        config
    }
}

/// Request body for `generateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: SystemInstruction,
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

/// Response body for `generateContent`, reduced to the fields read here
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Gemini completion client
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a client from configuration
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client from environment variables
    pub fn from_env() -> Self {
        Self::new(GeminiConfig::from_env())
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// Convert a controller request to the Gemini wire format
    ///
    /// The transcript maps verbatim, role by role: `User` → `"user"`,
    /// `Assistant` → `"model"`; the system prompt travels out-of-band in
    /// `systemInstruction`.
    fn build_request(request: &CompletionRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: SystemInstruction {
                parts: vec![Part {
                    text: request.system_prompt.clone(),
                }],
            },
            contents: request
                .transcript
                .iter()
                .map(|m| Content {
                    role: match m.role {
                        Role::User => "user".into(),
                        Role::Assistant => "model".into(),
                    },
                    parts: vec![Part {
                        text: m.content.clone(),
                    }],
                })
                .collect(),
        }
    }

    /// Read the reply text out of a response body
    ///
    /// Any shape deviation is a [`ChatError::MalformedReply`], folded into
    /// the same fallback-message path as a transport failure upstream.
    fn extract_reply(response: GenerateContentResponse) -> Result<String> {
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| ChatError::MalformedReply("response carried no candidate text".into()))
    }
}

#[async_trait(?Send)]
impl CompletionProvider for GeminiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let body = Self::build_request(request);

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::Provider(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("generateContent returned {status}");
            return Err(ChatError::Provider(format!("API error: {status}")));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ChatError::MalformedReply(e.to_string()))?;
        Self::extract_reply(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nerd_core::Message;

    #[test]
    fn test_config_defaults() {
        let config = GeminiConfig::new("k");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_request_wire_shape() {
        let request = CompletionRequest {
            system_prompt: "You are Nerd AI.".into(),
            transcript: vec![
                Message::assistant("Hey there!"),
                Message::user("what is a trait?"),
            ],
        };

        let body = serde_json::to_value(GeminiClient::build_request(&request)).unwrap();
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            "You are Nerd AI."
        );
        assert_eq!(body["contents"][0]["role"], "model");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Hey there!");
        assert_eq!(body["contents"][1]["role"], "user");
        assert_eq!(body["contents"][1]["parts"][0]["text"], "what is a trait?");
    }

    #[test]
    fn test_extract_reply_reads_first_candidate() {
        let payload: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"a trait is an interface"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(
            GeminiClient::extract_reply(payload).unwrap(),
            "a trait is an interface"
        );
    }

    #[test]
    fn test_extract_reply_rejects_empty_candidates() {
        let payload: GenerateContentResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(matches!(
            GeminiClient::extract_reply(payload),
            Err(ChatError::MalformedReply(_))
        ));
    }

    #[test]
    fn test_extract_reply_rejects_missing_parts() {
        let payload: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"role":"model"}}]}"#).unwrap();
        assert!(matches!(
            GeminiClient::extract_reply(payload),
            Err(ChatError::MalformedReply(_))
        ));
    }
}
