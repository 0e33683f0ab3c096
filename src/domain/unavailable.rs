//! Degraded-mode response returned when no engine is reachable.

use serde::{Deserialize, Serialize};

use super::result::BacktestResult;

pub const UNAVAILABLE_ERROR: &str = "Online backtesting requires WebAssembly setup";
pub const UNAVAILABLE_MESSAGE: &str =
    "The backtesting engine needs to be compiled to WebAssembly for browser execution";
pub const DEFAULT_REPOSITORY_URL: &str = "https://github.com/NikhilGolla72/GollaNikhil-PaceStock.git";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryInstructions {
    pub local: String,
    pub webassembly: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnavailableResponse {
    pub error: String,
    pub message: String,
    pub instructions: RecoveryInstructions,
    pub sample_result: BacktestResult,
}

impl UnavailableResponse {
    /// Build a fresh response. Output depends only on `repository_url`.
    pub fn new(repository_url: &str) -> Self {
        Self {
            error: UNAVAILABLE_ERROR.to_string(),
            message: UNAVAILABLE_MESSAGE.to_string(),
            instructions: RecoveryInstructions {
                local: format!(
                    "Clone the repo and run locally: git clone {repository_url} && \
                     fluxback run --strategy config/sma_demo.yaml --data demo/aapl_sample.csv"
                ),
                webassembly: "To enable online backtesting, compile the engine to WebAssembly \
                              and point [gateway] engine_url at it"
                    .to_string(),
            },
            sample_result: BacktestResult::sample(),
        }
    }
}
