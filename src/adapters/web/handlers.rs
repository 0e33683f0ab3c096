//! HTTP request handlers for the gateway.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::domain::request::BacktestRequest;
use crate::domain::service_info::ServiceDescriptor;
use crate::domain::unavailable::UnavailableResponse;

use super::{AppState, GatewayError};

/// `POST /api/backtest`.
///
/// Validates the body, then either forwards to the configured engine or
/// answers 503 with a freshly built [`UnavailableResponse`].
pub async fn run_backtest(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, GatewayError> {
    let request = BacktestRequest::from_json(&body)?;

    let Some(engine) = state.engine.as_ref() else {
        tracing::info!(
            strategy_bytes = request.strategy.len(),
            data_bytes = request.data.len(),
            "no engine configured, returning unavailability response"
        );
        let body = UnavailableResponse::new(&state.repository_url);
        return Ok((StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response());
    };

    let result = engine.execute(&request).await?;
    tracing::info!(total_trades = result.total_trades, "engine completed backtest");
    Ok((StatusCode::OK, Json(result)).into_response())
}

/// `GET /api/hello`.
pub async fn service_info(State(state): State<Arc<AppState>>) -> Json<ServiceDescriptor> {
    Json(ServiceDescriptor::current(&state.repository_url))
}

pub async fn method_not_allowed(method: Method, uri: Uri) -> GatewayError {
    tracing::debug!(%method, path = uri.path(), "method not allowed");
    GatewayError::method_not_allowed()
}

pub async fn not_found(uri: Uri) -> GatewayError {
    GatewayError::not_found(format!("No route for {}", uri.path()))
}
