use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{lenient, lenient_list, parse_lenient, require, send, ProviderClient, ProviderError};
use crate::config::{
    AnthropicConfig, Credential, DEFAULT_ANTHROPIC_API_VERSION, DEFAULT_ANTHROPIC_MAX_TOKENS,
    DEFAULT_ANTHROPIC_MODEL, DEFAULT_ANTHROPIC_URL,
};
use crate::Query;

const NAME: &str = "Claude";

/// Claude API client.
pub struct ClaudeClient {
    api_key: Option<String>,
    base_url: String,
    api_version: String,
    model: String,
    max_tokens: u32,
    client: Client,
}

impl ClaudeClient {
    /// Creates a new Claude client with the given API key.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_ANTHROPIC_URL.to_string(),
            api_version: DEFAULT_ANTHROPIC_API_VERSION.to_string(),
            model: DEFAULT_ANTHROPIC_MODEL.to_string(),
            max_tokens: DEFAULT_ANTHROPIC_MAX_TOKENS,
            client: Client::new(),
        }
    }

    pub fn from_config(config: &AnthropicConfig) -> Self {
        Self::new(config.api_key.clone())
            .with_model(config.model_or_default())
            .with_api_version(config.api_version_or_default())
            .with_base_url(config.base_url_or_default())
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the maximum tokens for responses.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets the API base URL (for proxies or enterprise deployments).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the API version.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }
}

#[async_trait]
impl ProviderClient for ClaudeClient {
    type Payload = String;

    fn name(&self) -> &'static str {
        NAME
    }

    async fn fetch(&self, query: &Query) -> Result<String, ProviderError> {
        let key = require(&self.api_key, Credential::AnthropicApiKey)?;

        let payload = ClaudeRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user".to_string(),
                content: query.as_str().to_string(),
            }],
        };

        let url = format!("{}/messages", self.base_url);
        let request = self
            .client
            .post(&url)
            .header("x-api-key", key)
            .header("anthropic-version", &self.api_version)
            .header("content-type", "application/json")
            .json(&payload);

        let body = send(NAME, request).await?;
        Ok(parse_messages_response(&body))
    }
}

/// Extracts the text of the first content block, or `""` if absent.
pub fn parse_messages_response(body: &str) -> String {
    let response: ClaudeResponse = parse_lenient(NAME, body);

    response
        .content
        .and_then(|blocks| blocks.into_iter().next())
        .and_then(|block| block.text)
        .unwrap_or_default()
}

#[derive(Debug, Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Default, Deserialize)]
struct ClaudeResponse {
    #[serde(default, deserialize_with = "lenient_list")]
    content: Option<Vec<ContentBlock>>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default, deserialize_with = "lenient")]
    text: Option<String>,
}
