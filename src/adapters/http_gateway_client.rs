//! reqwest-backed [`GatewayPort`].

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::error::FluxbackError;
use crate::domain::reply::{GatewayResponse, interpret_reply};
use crate::domain::request::BacktestRequest;
use crate::domain::service_info::{BACKTEST_PATH, INFO_PATH, ServiceDescriptor};
use crate::ports::gateway_port::GatewayPort;

/// Build a client with an optional overall request timeout.
pub fn build_http_client(timeout: Option<Duration>) -> Result<reqwest::Client, FluxbackError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(FluxbackError::transport)
}

pub struct HttpGatewayClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGatewayClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, FluxbackError> {
        Ok(Self::with_client(build_http_client(timeout)?, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl GatewayPort for HttpGatewayClient {
    async fn submit(&self, request: &BacktestRequest) -> Result<GatewayResponse, FluxbackError> {
        let response = self
            .client
            .post(self.url(BACKTEST_PATH))
            .json(request)
            .send()
            .await
            .map_err(FluxbackError::transport)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(FluxbackError::transport)?;
        tracing::debug!(status, bytes = body.len(), "gateway replied");
        interpret_reply(status, &body)
    }

    async fn service_info(&self) -> Result<ServiceDescriptor, FluxbackError> {
        let response = self
            .client
            .get(self.url(INFO_PATH))
            .send()
            .await
            .map_err(FluxbackError::transport)?
            .error_for_status()
            .map_err(FluxbackError::transport)?;
        response.json().await.map_err(FluxbackError::decode)
    }
}
