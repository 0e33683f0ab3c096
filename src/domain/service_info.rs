//! Static service descriptor served by the info endpoint.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const BACKTEST_PATH: &str = "/api/backtest";
pub const INFO_PATH: &str = "/api/hello";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub name: String,
    pub description: String,
    pub version: String,
    pub endpoints: BTreeMap<String, String>,
}

impl ServiceDescriptor {
    pub fn current(repository_url: &str) -> Self {
        let endpoints = BTreeMap::from([
            ("info".to_string(), INFO_PATH.to_string()),
            ("backtest".to_string(), BACKTEST_PATH.to_string()),
            ("github".to_string(), repository_url.trim_end_matches(".git").to_string()),
        ]);
        Self {
            name: "FluxBack".to_string(),
            description: "Regime-aware backtesting gateway".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            endpoints,
        }
    }
}
