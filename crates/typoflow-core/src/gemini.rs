//! Gemini `generateContent` client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::SuggestConfig;
use crate::error::SuggestError;
use crate::suggest::{StyleSuggester, SuggestionRequest};

/// Explicitly constructed handle to the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: SuggestConfig,
}

impl GeminiClient {
    pub fn new(config: SuggestConfig) -> Self {
        Self::with_http(reqwest::Client::new(), config)
    }

    /// Reuse an existing `reqwest::Client`.
    pub fn with_http(http: reqwest::Client, config: SuggestConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &SuggestConfig {
        &self.config
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

fn request_body(request: &SuggestionRequest) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: &request.prompt,
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: &request.schema,
        },
    }
}

impl StyleSuggester for GeminiClient {
    async fn complete(&self, request: &SuggestionRequest) -> Result<String, SuggestError> {
        if !self.config.has_api_key() {
            return Err(SuggestError::MissingApiKey);
        }

        let url = self.config.generate_url();
        tracing::debug!(%url, prompt_len = request.prompt.len(), "requesting style suggestion");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request_body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SuggestError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        parsed.text().ok_or(SuggestError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FONT_OPTIONS;

    #[test]
    fn test_request_body_shape() {
        let request = SuggestionRequest::new("hello", &FONT_OPTIONS, 1000);
        let body = serde_json::to_value(request_body(&request)).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], request.prompt.as_str());
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(
            body["generationConfig"]["responseSchema"]["type"],
            "OBJECT"
        );
    }

    #[test]
    fn test_response_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "{\"fontSize\""}, {"text": ": 20}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.text().as_deref(), Some(r#"{"fontSize": 20}"#));
    }

    #[test]
    fn test_response_without_text() {
        let empty: GenerateContentResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(empty.text(), None);

        let blocked: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert_eq!(blocked.text(), None);
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_network() {
        let client = GeminiClient::new(SuggestConfig::default());
        let request = SuggestionRequest::new("hello", &FONT_OPTIONS, 1000);
        let err = client.complete(&request).await.unwrap_err();
        assert!(matches!(err, SuggestError::MissingApiKey));
    }
}
