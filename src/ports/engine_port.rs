//! Boundary to the external backtest engine.

use async_trait::async_trait;

use crate::domain::error::FluxbackError;
use crate::domain::request::BacktestRequest;
use crate::domain::result::BacktestResult;

/// Executes a backtest somewhere else.
///
/// Implementations pass the request through unmodified and hand back the
/// engine's result unmodified.
#[async_trait]
pub trait EnginePort: Send + Sync {
    async fn execute(&self, request: &BacktestRequest) -> Result<BacktestResult, FluxbackError>;
}
