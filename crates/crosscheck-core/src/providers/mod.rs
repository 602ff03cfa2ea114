//! Provider clients: one outbound call per query, no retries.
//!
//! # Supported Providers
//!
//! - **Google Custom Search**: ranked web results
//! - **Gemini**, **OpenAI** and **Anthropic**: single-turn chat answers
//! - **Google Fact Check Tools**: published claim reviews
//!
//! Every client checks its credentials before touching the network and
//! parses its vendor payload leniently: absent fields become empty values.

mod claude;
mod error;
mod fact_check;
mod gemini;
mod openai;
mod search;

pub use claude::{parse_messages_response, ClaudeClient};
pub use error::ProviderError;
pub use fact_check::{parse_claim_search_response, FactCheckClient};
pub use gemini::{parse_generate_response, GeminiClient};
pub use openai::{parse_chat_response, OpenAIClient};
pub use search::{parse_search_response, GoogleSearchClient, SearchItem};

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::config::Credential;
use crate::Query;

/// A remote source that answers a query with a provider-specific payload.
///
/// # Example
///
/// ```ignore
/// use crosscheck_core::providers::{GeminiClient, ProviderClient};
///
/// let gemini = GeminiClient::new(Some(api_key));
/// let answer: String = gemini.fetch(&query).await?;
/// ```
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// What a successful call yields.
    type Payload: Send;

    /// Display name, also used in error messages ("Gemini request failed.").
    fn name(&self) -> &'static str;

    /// Performs the call.
    async fn fetch(&self, query: &Query) -> Result<Self::Payload, ProviderError>;
}

/// A chat provider answering in plain text.
pub type ChatClient = Box<dyn ProviderClient<Payload = String>>;

/// A web search provider.
pub type SearchClient = Box<dyn ProviderClient<Payload = Vec<SearchItem>>>;

/// A fact-check claim search provider.
pub type ClaimClient = Box<dyn ProviderClient<Payload = Vec<crate::factcheck::Claim>>>;

/// Returns the credential value, or a configuration error if it is absent or blank.
pub(crate) fn require(value: &Option<String>, credential: Credential) -> Result<&str, ProviderError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ProviderError::missing(credential))
}

/// Sends a request and returns the raw body of a successful response.
pub(crate) async fn send(provider: &'static str, request: RequestBuilder) -> Result<String, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|e| ProviderError::network(provider, e))?;

    let status = response.status();
    if !status.is_success() {
        let detail = response.text().await.unwrap_or_default();
        tracing::warn!(
            provider,
            status = status.as_u16(),
            detail = %truncate(&detail, 200),
            "provider returned an error status"
        );
        return Err(ProviderError::Request {
            provider,
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::network(provider, e))?;

    tracing::debug!(provider, bytes = body.len(), "provider response received");
    Ok(body)
}

/// Decodes a vendor payload, falling back to its default shape.
pub(crate) fn parse_lenient<T>(provider: &'static str, body: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(provider, error = %e, "unreadable response body, treating as empty");
            T::default()
        }
    }
}

/// Field decoder that turns a wrongly typed value into `None` instead of
/// failing the enclosing payload.
///
/// Use with `#[serde(default, deserialize_with = "lenient")]`.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Like [`lenient`] for arrays: malformed elements are skipped, the rest kept.
pub(crate) fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(elements) => Some(
            elements
                .into_iter()
                .filter_map(|element| T::deserialize(element).ok())
                .collect(),
        ),
        _ => None,
    })
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
