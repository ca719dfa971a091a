//! HTTP client for the market intelligence backend.

use super::{AnalysisBackend, DataConverter, RemoteHistoryDetail, RemoteHistoryEntry};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::state::MarketData;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Builder for creating an API client.
pub struct ApiClientBuilder {
    config: ApiConfig,
}

impl ApiClientBuilder {
    /// Create a new builder with default config.
    pub fn new() -> Self {
        Self {
            config: ApiConfig::default(),
        }
    }

    /// Set the API configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the backend base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Bound every request by a timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_secs = Some(timeout.as_secs().max(1));
        self
    }

    /// Build the API client.
    pub fn build(self) -> Result<ApiClient> {
        ApiClient::new(self.config)
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    sector: &'a str,
}

/// High-level API client for the analysis backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Configuration.
    config: ApiConfig,
    /// Underlying HTTP client.
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self { config, http })
    }

    /// Backend base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Fetch one page of the server-side history.
    pub async fn list_history(
        &self,
        page: usize,
        per_page: usize,
    ) -> Result<Vec<RemoteHistoryEntry>> {
        let response = self
            .http
            .get(self.url("/api/history"))
            .query(&[("page", page), ("perPage", per_page)])
            .send()
            .await?;
        let body = Self::read_body(response).await?;
        DataConverter::convert_history_page(&body)
    }

    /// Fetch one server-side history entry with its result.
    pub async fn fetch_history(&self, id: &str) -> Result<RemoteHistoryDetail> {
        let response = self
            .http
            .get(self.url(&format!("/api/history/{id}")))
            .send()
            .await?;
        let body = Self::read_body(response).await?;
        DataConverter::convert_history_detail(&body)
    }

    /// Delete one server-side history entry.
    pub async fn delete_history(&self, id: &str) -> Result<()> {
        let response = self
            .http
            .delete(self.url(&format!("/api/history/{id}")))
            .send()
            .await?;
        let body = Self::read_body(response).await?;
        DataConverter::convert_acknowledgement(&body)
    }

    /// Delete the whole server-side history.
    pub async fn clear_history(&self) -> Result<()> {
        let response = self.http.delete(self.url("/api/history")).send().await?;
        let body = Self::read_body(response).await?;
        DataConverter::convert_acknowledgement(&body)
    }

    /// Read a response body, rejecting non-2xx statuses.
    async fn read_body(response: reqwest::Response) -> Result<String> {
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, url = %response.url(), "Request failed");
            return Err(Error::transport(format!("HTTP {status}")));
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl AnalysisBackend for ApiClient {
    async fn analyze(&self, sector: &str) -> Result<MarketData> {
        let response = self
            .http
            .post(self.url("/api/analyze"))
            .json(&AnalyzeRequest { sector })
            .send()
            .await?;
        let body = Self::read_body(response).await?;
        DataConverter::convert_analysis(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer) -> ApiClient {
        ApiClientBuilder::new()
            .base_url(format!("{}/", server.base_url()))
            .build()
            .unwrap()
    }

    fn analysis_json() -> serde_json::Value {
        json!({
            "summary": "Fintech is growing",
            "trends": ["Embedded finance", "Stablecoins"],
            "startups": [{
                "name": "Ramp",
                "description": "Spend management",
                "link": "https://ramp.com"
            }],
            "theses": ["Infrastructure wins"]
        })
    }

    #[tokio::test]
    async fn test_analyze_posts_sector() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/analyze")
                    .json_body(json!({"sector": "Fintech"}));
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(analysis_json());
            })
            .await;

        let data = client(&server).analyze("Fintech").await.unwrap();

        mock.assert_async().await;
        assert_eq!(data.summary, "Fintech is growing");
        assert_eq!(data.trends, vec!["Embedded finance", "Stablecoins"]);
        assert_eq!(data.startups[0].link.as_deref(), Some("https://ramp.com"));
    }

    #[tokio::test]
    async fn test_analyze_non_2xx_is_transport_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/analyze");
                then.status(502)
                    .json_body(json!({"message": "upstream down"}));
            })
            .await;

        let err = client(&server).analyze("Fintech").await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(err.user_message(), crate::error::GENERIC_FETCH_FAILURE);
    }

    #[tokio::test]
    async fn test_analyze_business_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/analyze");
                then.status(200)
                    .json_body(json!({"code": 429, "message": "Too many analyses today"}));
            })
            .await;

        let err = client(&server).analyze("Fintech").await.unwrap_err();
        assert_eq!(err.user_message(), "Too many analyses today");
    }

    #[tokio::test]
    async fn test_analyze_malformed_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/analyze");
                then.status(200).json_body(json!({"trends": ["T1"]}));
            })
            .await;

        let err = client(&server).analyze("Fintech").await.unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let client = ApiClientBuilder::new()
            .base_url("http://127.0.0.1:9")
            .build()
            .unwrap();
        let err = client.analyze("Fintech").await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_list_history() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/history")
                    .query_param("page", "2")
                    .query_param("perPage", "10");
                then.status(200).json_body(json!({
                    "code": 200,
                    "message": "ok",
                    "data": [{"id": 11, "sector": "Fintech"}]
                }));
            })
            .await;

        let entries = client(&server).list_history(2, 10).await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            entries,
            vec![RemoteHistoryEntry {
                id: "11".to_string(),
                sector: "Fintech".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_fetch_and_delete_history() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/history/11");
                then.status(200)
                    .json_body(json!({"sector": "Fintech", "data": analysis_json()}));
            })
            .await;
        let delete = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/api/history/11");
                then.status(200).json_body(json!({"code": 200, "message": "deleted"}));
            })
            .await;
        let clear = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/api/history");
                then.status(204);
            })
            .await;

        let client = client(&server);
        let detail = client.fetch_history("11").await.unwrap();
        assert_eq!(detail.sector, "Fintech");
        assert_eq!(detail.data.theses, vec!["Infrastructure wins"]);

        client.delete_history("11").await.unwrap();
        client.clear_history().await.unwrap();
        delete.assert_async().await;
        clear.assert_async().await;
    }
}
