use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{lenient, lenient_list, parse_lenient, require, send, ProviderClient, ProviderError};
use crate::config::{
    Credential, FactCheckConfig, DEFAULT_FACT_CHECK_PAGE_SIZE, DEFAULT_FACT_CHECK_URL,
};
use crate::factcheck::{Claim, ClaimReview};
use crate::Query;

const NAME: &str = "Fact Check";

/// Google Fact Check Tools `claims:search` client.
pub struct FactCheckClient {
    api_key: Option<String>,
    base_url: String,
    page_size: u32,
    client: Client,
}

impl FactCheckClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_FACT_CHECK_URL.to_string(),
            page_size: DEFAULT_FACT_CHECK_PAGE_SIZE,
            client: Client::new(),
        }
    }

    pub fn from_config(config: &FactCheckConfig) -> Self {
        Self::new(config.api_key.clone()).with_base_url(config.base_url_or_default())
    }

    /// Sets the base URL (for proxies or tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl ProviderClient for FactCheckClient {
    type Payload = Vec<Claim>;

    fn name(&self) -> &'static str {
        NAME
    }

    async fn fetch(&self, query: &Query) -> Result<Vec<Claim>, ProviderError> {
        let key = require(&self.api_key, Credential::FactCheckApiKey)?;

        let url = format!("{}/v1alpha1/claims:search", self.base_url);
        let page_size = self.page_size.to_string();
        let request = self.client.get(&url).query(&[
            ("key", key),
            ("query", query.as_str()),
            ("pageSize", page_size.as_str()),
        ]);

        let body = send(NAME, request).await?;
        Ok(parse_claim_search_response(&body))
    }
}

/// Converts a `claims:search` response into claims, keeping provider order.
///
/// Only the first `claimReview` entry of each claim is kept.
pub fn parse_claim_search_response(body: &str) -> Vec<Claim> {
    let response: ClaimSearchResponse = parse_lenient(NAME, body);

    response
        .claims
        .unwrap_or_default()
        .into_iter()
        .map(|claim| Claim {
            text: claim.text.unwrap_or_default(),
            review: claim
                .claim_review
                .and_then(|reviews| reviews.into_iter().next())
                .map(|review| ClaimReview {
                    rating: review.textual_rating.unwrap_or_default(),
                    publisher_name: review
                        .publisher
                        .and_then(|p| p.name)
                        .unwrap_or_default(),
                }),
        })
        .collect()
}

#[derive(Debug, Default, Deserialize)]
struct ClaimSearchResponse {
    #[serde(default, deserialize_with = "lenient_list")]
    claims: Option<Vec<ClaimResponse>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClaimResponse {
    #[serde(default, deserialize_with = "lenient")]
    text: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    claim_review: Option<Vec<ReviewResponse>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewResponse {
    #[serde(default, deserialize_with = "lenient")]
    textual_rating: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    publisher: Option<Publisher>,
}

#[derive(Debug, Deserialize)]
struct Publisher {
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
}
