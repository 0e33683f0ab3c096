//! Sample resource sources: a static HTTP location or a local directory.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::error::FluxbackError;
use crate::ports::sample_port::SampleSource;

pub struct HttpSampleSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSampleSource {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl SampleSource for HttpSampleSource {
    async fn fetch_text(&self, resource: &str) -> Result<String, FluxbackError> {
        let url = format!("{}/{}", self.base_url, resource.trim_start_matches('/'));
        self.client
            .get(&url)
            .send()
            .await
            .map_err(FluxbackError::transport)?
            .error_for_status()
            .map_err(FluxbackError::transport)?
            .text()
            .await
            .map_err(FluxbackError::decode)
    }
}

pub struct DirectorySampleSource {
    root: PathBuf,
}

impl DirectorySampleSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl SampleSource for DirectorySampleSource {
    async fn fetch_text(&self, resource: &str) -> Result<String, FluxbackError> {
        let path = self.root.join(resource.trim_start_matches('/'));
        Ok(tokio::fs::read_to_string(path).await?)
    }
}
