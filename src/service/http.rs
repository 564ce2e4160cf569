//! HTTP client for the advisor query endpoint.
//!
//! One request per submission: `POST <endpoint>` with `{"query": ...}`,
//! expecting `{"answer": ...}` back. No retries and, unless configured,
//! no timeout.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Url;
use reqwest::header::CONTENT_TYPE;

use super::client::{AdvisorClient, AdvisorError};
use super::types::{QueryRequest, QueryResponse};

pub struct HttpAdvisorClient {
    endpoint: Url,
    client: reqwest::Client,
}

impl HttpAdvisorClient {
    /// Builds a client for `endpoint`. `timeout` of `None` lets a request
    /// run until the server answers or the connection fails.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, AdvisorError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| AdvisorError::Config(format!("invalid endpoint '{endpoint}': {e}")))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AdvisorError::Config(e.to_string()))?;

        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AdvisorClient for HttpAdvisorClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn ask(&self, query: &str) -> Result<String, AdvisorError> {
        let body = QueryRequest { query };

        info!("Sending query to {} ({} bytes)", self.endpoint, query.len());
        debug!(
            "Request body: {}",
            serde_json::to_string(&body).unwrap_or_default()
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AdvisorError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Advisor response status: {}", status);

        let text = response
            .text()
            .await
            .map_err(|e| AdvisorError::Network(e.to_string()))?;
        debug!("Response body: {}", text);

        if !status.is_success() {
            warn!("Advisor API error: {} - {}", status, text);
            return Err(AdvisorError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let parsed: QueryResponse =
            serde_json::from_str(&text).map_err(|e| AdvisorError::Parse(e.to_string()))?;

        parsed.answer.ok_or(AdvisorError::MissingAnswer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_endpoint() {
        let result = HttpAdvisorClient::new("not a url", None);
        assert!(matches!(result, Err(AdvisorError::Config(_))));
    }

    #[test]
    fn test_new_keeps_endpoint() {
        let client =
            HttpAdvisorClient::new("http://localhost:8000/query", Some(Duration::from_secs(5)))
                .unwrap();
        assert_eq!(client.endpoint().as_str(), "http://localhost:8000/query");
        assert_eq!(client.name(), "http");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        // Port 9 (discard) on localhost is closed in test environments
        let client = HttpAdvisorClient::new("http://127.0.0.1:9/query", None).unwrap();
        let result = client.ask("hello").await;
        assert!(matches!(result, Err(AdvisorError::Network(_))));
    }
}
