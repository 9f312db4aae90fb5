//! HTTP client for the Ticketmaster attractions catalog

use iced::widget::image;
use reqwest::Client;

use super::types::{QueryResult, SuggestResponse};
use crate::config::Config;
use crate::error::FetchError;

/// Result page requested from the catalog
const PAGE: &str = "4";

/// Client for the catalog `attractions` endpoint
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl CatalogClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.attractions_url(),
            api_key: config.api_key.clone(),
        }
    }

    /// Fetch attractions and spelling suggestions for `keyword`.
    ///
    /// A blank keyword short-circuits to an empty result without a request.
    pub async fn fetch_suggestions(&self, keyword: &str) -> Result<QueryResult, FetchError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(QueryResult::default());
        }

        tracing::debug!("GET {} keyword={:?}", self.endpoint, keyword);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("keyword", keyword),
                ("includeSpellcheck", "yes"),
                ("page", PAGE),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: SuggestResponse = response.json().await?;
        Ok(body.into())
    }

    /// Download a thumbnail into an image handle
    pub async fn fetch_image(&self, url: &str) -> Result<image::Handle, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        Ok(image::Handle::from_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> CatalogClient {
        CatalogClient::new(&Config {
            api_base_url: server.url("/discovery/v2/"),
            api_key: "test-key".to_string(),
        })
    }

    #[tokio::test]
    async fn test_fetch_sends_expected_query() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/discovery/v2/attractions")
                    .query_param("apikey", "test-key")
                    .query_param("keyword", "metal")
                    .query_param("includeSpellcheck", "yes")
                    .query_param("page", "4");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(serde_json::json!({
                        "_embedded": { "attractions": [
                            { "id": "1", "name": "Metallica", "type": "attraction" }
                        ] },
                        "spellcheck": { "suggestions": [] }
                    }));
            })
            .await;

        let result = client_for(&server).fetch_suggestions("  metal ").await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.attractions.len(), 1);
        assert_eq!(result.attractions[0].id, "1");
        assert_eq!(result.attractions[0].name, "Metallica");
        assert!(result.suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_spellcheck_only_response() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/discovery/v2/attractions");
                then.status(200).json_body(serde_json::json!({
                    "spellcheck": { "suggestions": [ { "suggestion": "metallica", "score": 0.9 } ] }
                }));
            })
            .await;

        let result = client_for(&server).fetch_suggestions("xyz").await.unwrap();

        assert!(result.attractions.is_empty());
        assert_eq!(result.suggestions.len(), 1);
        assert_eq!(result.suggestions[0].suggestion, "metallica");
        assert!((result.suggestions[0].score - 0.9).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/discovery/v2/attractions");
                then.status(500).body("boom");
            })
            .await;

        let err = client_for(&server).fetch_suggestions("metal").await.unwrap_err();
        assert_eq!(err, FetchError::Status(500));
    }

    #[tokio::test]
    async fn test_invalid_json_is_a_decode_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/discovery/v2/attractions");
                then.status(200).body("<html>not json</html>");
            })
            .await;

        let err = client_for(&server).fetch_suggestions("metal").await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_blank_keyword_skips_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(200).json_body(serde_json::json!({}));
            })
            .await;

        let result = client_for(&server).fetch_suggestions("   ").await.unwrap();

        assert_eq!(result, QueryResult::default());
        assert_eq!(mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_empty_base_url_fails_as_transport() {
        let client = CatalogClient::new(&Config::default());
        let err = client.fetch_suggestions("metal").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
