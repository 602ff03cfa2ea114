use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{lenient, lenient_list, parse_lenient, require, send, ProviderClient, ProviderError};
use crate::config::{
    Credential, OpenAIConfig, DEFAULT_OPENAI_MODEL, DEFAULT_OPENAI_TEMPERATURE, DEFAULT_OPENAI_URL,
};
use crate::Query;

const NAME: &str = "ChatGPT";

/// OpenAI chat completions client.
///
/// Any endpoint implementing the OpenAI chat completions API works, so the
/// base URL can point at Azure, OpenRouter or a local server as well.
pub struct OpenAIClient {
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f32,
    client: Client,
}

impl OpenAIClient {
    /// Creates a new OpenAI client.
    ///
    /// # Arguments
    /// * `api_key` - The API key; the call fails up front when it is missing
    /// * `model` - The model name (e.g., "gpt-4o-mini")
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_OPENAI_URL.to_string(),
            model: model.into(),
            temperature: DEFAULT_OPENAI_TEMPERATURE,
            client: Client::new(),
        }
    }

    pub fn from_config(config: &OpenAIConfig) -> Self {
        Self::new(config.api_key.clone(), config.model_or_default())
            .with_temperature(config.temperature_or_default())
            .with_base_url(config.base_url_or_default())
    }

    /// Sets the base URL (e.g., "https://openrouter.ai/api/v1").
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

impl Default for OpenAIClient {
    fn default() -> Self {
        Self::new(None, DEFAULT_OPENAI_MODEL)
    }
}

#[async_trait]
impl ProviderClient for OpenAIClient {
    type Payload = String;

    fn name(&self) -> &'static str {
        NAME
    }

    async fn fetch(&self, query: &Query) -> Result<String, ProviderError> {
        let key = require(&self.api_key, Credential::OpenAIApiKey)?;

        let payload = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: query.as_str().to_string(),
            }],
            temperature: self.temperature,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let request = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {}", key))
            .json(&payload);

        let body = send(NAME, request).await?;
        Ok(parse_chat_response(&body))
    }
}

/// Extracts `choices[0].message.content`, or `""` if any step is absent.
pub fn parse_chat_response(body: &str) -> String {
    let response: ChatResponse = parse_lenient(NAME, body);

    response
        .choices
        .and_then(|c| c.into_iter().next())
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .unwrap_or_default()
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Default, Deserialize)]
struct ChatResponse {
    #[serde(default, deserialize_with = "lenient_list")]
    choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default, deserialize_with = "lenient")]
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default, deserialize_with = "lenient")]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OpenAIClient::new(Some("test-key".to_string()), "gpt-4o");
        assert_eq!(client.base_url, DEFAULT_OPENAI_URL);
        assert_eq!(client.model, "gpt-4o");
        assert_eq!(client.temperature, DEFAULT_OPENAI_TEMPERATURE);
    }

    #[test]
    fn test_from_config() {
        let config = OpenAIConfig {
            api_key: Some("sk".to_string()),
            model: Some("gpt-4o".to_string()),
            temperature: Some(0.7),
            base_url: Some("http://localhost:8080/v1/".to_string()),
        };
        let client = OpenAIClient::from_config(&config);
        assert_eq!(client.model, "gpt-4o");
        assert_eq!(client.temperature, 0.7);
        assert_eq!(client.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_url_trailing_slash_removed() {
        let client = OpenAIClient::default().with_base_url("https://api.example.com/v1/");
        assert_eq!(client.base_url, "https://api.example.com/v1");
        assert_eq!(client.model, DEFAULT_OPENAI_MODEL);
    }

    #[test]
    fn test_parse_content() {
        let body = r#"{"choices": [{"index": 0, "message": {"role": "assistant", "content": "Hi"}}]}"#;
        assert_eq!(parse_chat_response(body), "Hi");
    }

    #[test]
    fn test_parse_missing_fields() {
        assert_eq!(parse_chat_response(r#"{"choices": []}"#), "");
        assert_eq!(parse_chat_response(r#"{"choices": [{"message": {"content": null}}]}"#), "");
        assert_eq!(parse_chat_response(""), "");
    }
}
