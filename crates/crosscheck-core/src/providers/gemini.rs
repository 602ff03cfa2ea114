use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{lenient, lenient_list, parse_lenient, require, send, ProviderClient, ProviderError};
use crate::config::{Credential, GeminiConfig, DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_URL};
use crate::Query;

const NAME: &str = "Gemini";

/// Gemini `generateContent` client.
pub struct GeminiClient {
    api_key: Option<String>,
    base_url: String,
    model: String,
    client: Client,
}

impl GeminiClient {
    /// Creates a new Gemini client with the given API key.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_GEMINI_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            client: Client::new(),
        }
    }

    pub fn from_config(config: &GeminiConfig) -> Self {
        Self::new(config.api_key.clone())
            .with_model(config.model_or_default())
            .with_base_url(config.base_url_or_default())
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL (for proxies or tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl ProviderClient for GeminiClient {
    type Payload = String;

    fn name(&self) -> &'static str {
        NAME
    }

    async fn fetch(&self, query: &Query) -> Result<String, ProviderError> {
        let key = require(&self.api_key, Credential::GeminiApiKey)?;

        let payload = GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: query.as_str().to_string(),
                }],
            }],
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let request = self
            .client
            .post(&url)
            .query(&[("key", key)])
            .header("content-type", "application/json")
            .json(&payload);

        let body = send(NAME, request).await?;
        Ok(parse_generate_response(&body))
    }
}

/// Extracts `candidates[0].content.parts[0].text`, or `""` if any step is absent.
pub fn parse_generate_response(body: &str) -> String {
    let response: GenerateResponse = parse_lenient(NAME, body);

    response
        .candidates
        .and_then(|c| c.into_iter().next())
        .and_then(|c| c.content)
        .and_then(|c| c.parts)
        .and_then(|p| p.into_iter().next())
        .and_then(|p| p.text)
        .unwrap_or_default()
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default, deserialize_with = "lenient_list")]
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default, deserialize_with = "lenient")]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default, deserialize_with = "lenient_list")]
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default, deserialize_with = "lenient")]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text() {
        let body = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Yes.\nIt is round."}]},
                "finishReason": "STOP"
            }]
        }"#;
        assert_eq!(parse_generate_response(body), "Yes.\nIt is round.");
    }

    #[test]
    fn test_parse_missing_fields() {
        assert_eq!(parse_generate_response("{}"), "");
        assert_eq!(parse_generate_response(r#"{"candidates": []}"#), "");
        assert_eq!(parse_generate_response(r#"{"candidates": [{}]}"#), "");
        assert_eq!(
            parse_generate_response(r#"{"candidates": [{"content": {"parts": [{}]}}]}"#),
            ""
        );
    }

    #[test]
    fn test_parse_skips_malformed_part() {
        let body = r#"{"candidates": [{"content": {"parts": [7, {"text": "Fine."}]}}]}"#;
        assert_eq!(parse_generate_response(body), "Fine.");
    }

    #[test]
    fn test_client_defaults() {
        let client = GeminiClient::new(None);
        assert_eq!(client.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(client.base_url, DEFAULT_GEMINI_URL);
    }
}
