//! Typed settings built from a [`ConfigPort`].

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use super::error::FluxbackError;
use super::samples::{DEFAULT_SAMPLE_DATASET, DEFAULT_SAMPLE_STRATEGY, SampleResources};
use super::unavailable::DEFAULT_REPOSITORY_URL;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_LISTEN: &str = "127.0.0.1:3000";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 60;

/// Whether the gateway can reach a real engine. Fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineMode {
    Unavailable,
    Remote { url: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GatewaySettings {
    pub listen: SocketAddr,
    pub engine: EngineMode,
    pub repository_url: String,
    pub static_dir: Option<PathBuf>,
    pub request_timeout: Option<Duration>,
}

impl GatewaySettings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, FluxbackError> {
        let listen_str = config
            .get_non_blank("gateway", "listen")
            .unwrap_or_else(|| DEFAULT_LISTEN.to_string());
        let listen = listen_str
            .parse()
            .map_err(|_| FluxbackError::ConfigInvalid {
                section: "gateway".into(),
                key: "listen".into(),
                reason: format!("'{listen_str}' is not a socket address"),
            })?;

        let engine = match config.get_non_blank("gateway", "engine_url") {
            Some(url) => EngineMode::Remote { url },
            None => EngineMode::Unavailable,
        };

        Ok(Self {
            listen,
            engine,
            repository_url: config
                .get_non_blank("gateway", "repository_url")
                .unwrap_or_else(|| DEFAULT_REPOSITORY_URL.to_string()),
            static_dir: config.get_non_blank("gateway", "static_dir").map(PathBuf::from),
            request_timeout: timeout(config.get_u64(
                "gateway",
                "request_timeout_secs",
                DEFAULT_GATEWAY_TIMEOUT_SECS,
            )?),
        })
    }

    /// Timeout for calls to a remote engine.
    ///
    /// Shorter than `request_timeout` so an engine that never answers fails
    /// the call with an engine error before the gateway's own deadline.
    pub fn engine_timeout(&self) -> Option<Duration> {
        self.request_timeout.map(|t| t * 4 / 5)
    }
}

/// Where the controller fetches its startup resources from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleLocation {
    Http { base_url: String },
    Directory { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub api_url: String,
    pub timeout: Option<Duration>,
    /// `None` means the gateway's own `/static` mount.
    pub samples: Option<SampleLocation>,
    pub resources: SampleResources,
}

impl ClientSettings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, FluxbackError> {
        let api_url = match config.get_string("client", "api_url") {
            Some(_) => config.require_string("client", "api_url")?,
            None => DEFAULT_API_URL.to_string(),
        };
        let api_url = api_url.trim_end_matches('/').to_string();

        let samples = match (
            config.get_non_blank("client", "sample_base_url"),
            config.get_non_blank("client", "sample_dir"),
        ) {
            (Some(base_url), _) => Some(SampleLocation::Http {
                base_url: base_url.trim_end_matches('/').to_string(),
            }),
            (None, Some(dir)) => Some(SampleLocation::Directory {
                path: PathBuf::from(dir),
            }),
            (None, None) => None,
        };

        Ok(Self {
            timeout: timeout(config.get_u64("client", "timeout_secs", DEFAULT_CLIENT_TIMEOUT_SECS)?),
            samples,
            resources: SampleResources {
                dataset: config
                    .get_non_blank("client", "sample_dataset")
                    .unwrap_or_else(|| DEFAULT_SAMPLE_DATASET.to_string()),
                strategy: config
                    .get_non_blank("client", "sample_strategy")
                    .unwrap_or_else(|| DEFAULT_SAMPLE_STRATEGY.to_string()),
            },
            api_url,
        })
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    pub fn sample_location(&self) -> SampleLocation {
        self.samples.clone().unwrap_or_else(|| SampleLocation::Http {
            base_url: format!("{}/static", self.api_url),
        })
    }
}

fn timeout(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
