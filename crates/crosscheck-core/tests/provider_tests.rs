//! Provider contract tests against a local mock server.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crosscheck_core::config::{Credential, DEFAULT_ANTHROPIC_MODEL, DEFAULT_OPENAI_MODEL};
use crosscheck_core::providers::{
    ClaudeClient, FactCheckClient, GeminiClient, GoogleSearchClient, OpenAIClient,
};
use crosscheck_core::{ProviderClient, ProviderError, Query};

fn query() -> Query {
    Query::new("Is coffee bad for you?").unwrap()
}

fn key(value: &str) -> Option<String> {
    Some(value.to_string())
}

// Gemini
mod gemini {
    use super::*;

    #[tokio::test]
    async fn test_request_shape_and_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .and(query_param("key", "gem-key"))
            .and(body_partial_json(json!({
                "contents": [{"role": "user", "parts": [{"text": "Is coffee bad for you?"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "In moderation, no."}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(key("gem-key")).with_base_url(server.uri());
        let answer = client.fetch(&query()).await.unwrap();
        assert_eq!(answer, "In moderation, no.");
    }

    #[tokio::test]
    async fn test_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = GeminiClient::new(key("gem-key")).with_base_url(server.uri());
        let err = client.fetch(&query()).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "Gemini request failed.");
    }

    #[tokio::test]
    async fn test_network_error_hides_key_in_url() {
        // Nothing listens on port 1.
        let client = GeminiClient::new(key("SECRET")).with_base_url("http://127.0.0.1:1");
        let err = client.fetch(&query()).await.unwrap_err();
        assert!(matches!(err, ProviderError::Network { provider: "Gemini", .. }));
        assert!(!err.to_string().contains("SECRET"));
        assert!(!format!("{:?}", err).contains("SECRET"));
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = GeminiClient::new(None).with_base_url(server.uri());
        let err = client.fetch(&query()).await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Configuration {
                credential: Credential::GeminiApiKey
            }
        ));
    }
}

// OpenAI
mod openai {
    use super::*;

    #[tokio::test]
    async fn test_request_shape_and_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": DEFAULT_OPENAI_MODEL,
                "messages": [{"role": "user", "content": "Is coffee bad for you?"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "Not really."}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenAIClient::new(key("sk-test"), DEFAULT_OPENAI_MODEL).with_base_url(server.uri());
        assert_eq!(client.fetch(&query()).await.unwrap(), "Not really.");
    }

    #[tokio::test]
    async fn test_rate_limit_is_request_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let client = OpenAIClient::new(key("sk-test"), "gpt-4o").with_base_url(server.uri());
        let err = client.fetch(&query()).await.unwrap_err();
        assert_eq!(err.to_string(), "ChatGPT request failed.");
    }

    #[tokio::test]
    async fn test_unreadable_body_is_empty_answer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let client = OpenAIClient::new(key("sk-test"), "gpt-4o").with_base_url(server.uri());
        assert_eq!(client.fetch(&query()).await.unwrap(), "");
    }
}

// Claude
mod claude {
    use super::*;

    #[tokio::test]
    async fn test_request_shape_and_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(header("x-api-key", "ant-key"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(body_partial_json(json!({
                "model": DEFAULT_ANTHROPIC_MODEL,
                "max_tokens": 512,
                "messages": [{"role": "user", "content": "Is coffee bad for you?"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "Mostly fine."}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ClaudeClient::new(key("ant-key")).with_base_url(server.uri());
        assert_eq!(client.fetch(&query()).await.unwrap(), "Mostly fine.");
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Nothing listens on port 1.
        let client = ClaudeClient::new(key("ant-key")).with_base_url("http://127.0.0.1:1");
        let err = client.fetch(&query()).await.unwrap_err();
        assert!(matches!(err, ProviderError::Network { provider: "Claude", .. }));
        assert!(err.to_string().starts_with("Claude request failed"));
    }
}

// Google Custom Search
mod search {
    use super::*;

    #[tokio::test]
    async fn test_request_shape_and_items() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .and(query_param("key", "g-key"))
            .and(query_param("cx", "engine-1"))
            .and(query_param("q", "Is coffee bad for you?"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {"title": "Coffee and health", "link": "https://example.org/coffee", "snippet": "Studies show..."},
                    {"title": "Caffeine", "link": "https://example.org/caffeine"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GoogleSearchClient::new(key("g-key"), key("engine-1")).with_base_url(server.uri());
        let items = client.fetch(&query()).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Coffee and health");
        assert_eq!(items[1].snippet, "");
    }

    #[tokio::test]
    async fn test_missing_cx() {
        let client = GoogleSearchClient::new(key("g-key"), None);
        let err = client.fetch(&query()).await.unwrap_err();
        assert_eq!(err.to_string(), "Google Search CX is not configured.");
    }

    #[tokio::test]
    async fn test_network_error_hides_key_and_cx() {
        let client = GoogleSearchClient::new(key("g-SECRET"), key("cx-SECRET"))
            .with_base_url("http://127.0.0.1:1");
        let err = client.fetch(&query()).await.unwrap_err();
        assert!(err.to_string().starts_with("Google Search request failed"));
        assert!(!err.to_string().contains("SECRET"));
    }

    #[tokio::test]
    async fn test_no_items() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"kind": "customsearch#search"})))
            .mount(&server)
            .await;

        let client = GoogleSearchClient::new(key("g-key"), key("cx")).with_base_url(server.uri());
        assert!(client.fetch(&query()).await.unwrap().is_empty());
    }
}

// Fact Check Tools
mod fact_check {
    use super::*;

    #[tokio::test]
    async fn test_request_shape_and_claims() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1alpha1/claims:search"))
            .and(query_param("key", "fc-key"))
            .and(query_param("query", "Is coffee bad for you?"))
            .and(query_param("pageSize", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "claims": [{
                    "text": "Coffee stunts growth",
                    "claimReview": [{"publisher": {"name": "Snopes"}, "textualRating": "False"}]
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = FactCheckClient::new(key("fc-key")).with_base_url(server.uri());
        let claims = client.fetch(&query()).await.unwrap();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].text, "Coffee stunts growth");
        let review = claims[0].review.as_ref().unwrap();
        assert_eq!(review.rating, "False");
        assert_eq!(review.publisher_name, "Snopes");
    }

    #[tokio::test]
    async fn test_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = FactCheckClient::new(key("fc-key")).with_base_url(server.uri());
        let err = client.fetch(&query()).await.unwrap_err();
        assert_eq!(err.to_string(), "Fact Check request failed.");
        assert_eq!(client.name(), "Fact Check");
    }
}
