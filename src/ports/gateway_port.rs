//! Controller-side view of the backtest gateway.

use async_trait::async_trait;

use crate::domain::error::FluxbackError;
use crate::domain::reply::GatewayResponse;
use crate::domain::request::BacktestRequest;
use crate::domain::service_info::ServiceDescriptor;

#[async_trait]
pub trait GatewayPort: Send + Sync {
    /// Submit one backtest. `Err` means the reply could not be interpreted at all.
    async fn submit(&self, request: &BacktestRequest) -> Result<GatewayResponse, FluxbackError>;

    async fn service_info(&self) -> Result<ServiceDescriptor, FluxbackError>;
}
