//! HttpRoutingClient: HTTP client for the external routing provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::RoutingError;

use super::{RouteRequest, RouteResponse, RoutingProvider};

/// Client for the routing provider's route endpoint.
pub struct HttpRoutingClient {
    base_url: Url,
    http_client: Client,
}

impl HttpRoutingClient {
    /// Create a client with the default per-request timeout.
    pub fn new(base_url: &str) -> Result<Self, RoutingError> {
        Self::with_timeout(base_url, Duration::from_secs(10))
    }

    /// Create a client with an explicit per-request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, RoutingError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: Url::parse(base_url)?,
            http_client,
        })
    }
}

#[async_trait]
impl RoutingProvider for HttpRoutingClient {
    async fn route(&self, request: &RouteRequest) -> Result<RouteResponse, RoutingError> {
        let url = self.base_url.join("v1/route")?;

        let resp = self.http_client.post(url).json(request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RoutingError::Status {
                status: status.as_u16(),
            });
        }

        let raw = resp.text().await?;
        let body: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|e| RoutingError::MalformedResponse(e.to_string()))?;

        if let Some(err) = body.get("error") {
            return Err(RoutingError::MalformedResponse(format!(
                "provider error: {err}"
            )));
        }

        serde_json::from_value(body).map_err(|e| RoutingError::MalformedResponse(e.to_string()))
    }
}
