//! [`EnginePort`] that forwards requests to an engine over HTTP.

use async_trait::async_trait;

use crate::domain::error::FluxbackError;
use crate::domain::reply::ErrorBody;
use crate::domain::request::BacktestRequest;
use crate::domain::result::BacktestResult;
use crate::ports::engine_port::EnginePort;

pub struct RemoteEngine {
    client: reqwest::Client,
    url: String,
}

impl RemoteEngine {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl EnginePort for RemoteEngine {
    async fn execute(&self, request: &BacktestRequest) -> Result<BacktestResult, FluxbackError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| FluxbackError::Engine {
                reason: e.to_string(),
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| FluxbackError::Engine {
            reason: e.to_string(),
        })?;

        if !status.is_success() {
            let reason = serde_json::from_slice::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| format!("engine replied {status}"));
            return Err(FluxbackError::Engine { reason });
        }

        serde_json::from_slice(&body).map_err(|e| FluxbackError::Engine {
            reason: format!("unreadable engine result: {e}"),
        })
    }
}
