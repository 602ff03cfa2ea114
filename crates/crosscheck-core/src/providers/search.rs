use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{lenient, lenient_list, parse_lenient, require, send, ProviderClient, ProviderError};
use crate::config::{Credential, GoogleSearchConfig, DEFAULT_GOOGLE_SEARCH_URL};
use crate::Query;

const NAME: &str = "Google Search";

/// One web search hit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchItem {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

/// Google Custom Search JSON API client.
pub struct GoogleSearchClient {
    api_key: Option<String>,
    search_cx: Option<String>,
    base_url: String,
    client: Client,
}

impl GoogleSearchClient {
    /// Creates a client against the public Google APIs endpoint.
    pub fn new(api_key: Option<String>, search_cx: Option<String>) -> Self {
        Self {
            api_key,
            search_cx,
            base_url: DEFAULT_GOOGLE_SEARCH_URL.to_string(),
            client: Client::new(),
        }
    }

    pub fn from_config(config: &GoogleSearchConfig) -> Self {
        Self::new(config.api_key.clone(), config.search_cx.clone())
            .with_base_url(config.base_url_or_default())
    }

    /// Sets the base URL (for proxies or tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl ProviderClient for GoogleSearchClient {
    type Payload = Vec<SearchItem>;

    fn name(&self) -> &'static str {
        NAME
    }

    async fn fetch(&self, query: &Query) -> Result<Vec<SearchItem>, ProviderError> {
        let key = require(&self.api_key, Credential::GoogleApiKey)?;
        let cx = require(&self.search_cx, Credential::GoogleSearchCx)?;

        let url = format!("{}/customsearch/v1", self.base_url);
        let request = self
            .client
            .get(&url)
            .query(&[("key", key), ("cx", cx), ("q", query.as_str())]);

        let body = send(NAME, request).await?;
        Ok(parse_search_response(&body))
    }
}

/// Extracts `items[] {title, link, snippet}` from a Custom Search response.
pub fn parse_search_response(body: &str) -> Vec<SearchItem> {
    let response: SearchResponse = parse_lenient(NAME, body);

    response
        .items
        .unwrap_or_default()
        .into_iter()
        .map(|item| SearchItem {
            title: item.title.unwrap_or_default(),
            link: item.link.unwrap_or_default(),
            snippet: item.snippet.unwrap_or_default(),
        })
        .collect()
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default, deserialize_with = "lenient_list")]
    items: Option<Vec<ItemResponse>>,
}

#[derive(Debug, Default, Deserialize)]
struct ItemResponse {
    #[serde(default, deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    link: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    snippet: Option<String>,
}
