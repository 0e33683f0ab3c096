//! Backtest gateway (axum).
//!
//! Routes:
//! - `POST /api/backtest`: validate and forward, or answer 503 in unavailable mode
//! - `GET /api/hello`: static service descriptor
//! - `/static/*`: optional sample resources from a directory
//!
//! Every other verb on a known route is a 405 with a JSON error body.

mod error;
mod handlers;

pub use error::*;
pub use handlers::*;

use axum::{
    Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};

use crate::domain::error::FluxbackError;
use crate::domain::service_info::{BACKTEST_PATH, INFO_PATH};
use crate::domain::settings::{EngineMode, GatewaySettings};
use crate::ports::engine_port::EnginePort;

pub struct AppState {
    /// `None` in unavailable mode. Chosen once at startup.
    pub engine: Option<Arc<dyn EnginePort>>,
    pub repository_url: String,
}

impl AppState {
    pub fn unavailable(repository_url: impl Into<String>) -> Self {
        Self {
            engine: None,
            repository_url: repository_url.into(),
        }
    }

    pub fn from_settings(settings: &GatewaySettings) -> Result<Self, FluxbackError> {
        let engine: Option<Arc<dyn EnginePort>> = match &settings.engine {
            EngineMode::Unavailable => None,
            EngineMode::Remote { url } => {
                let client =
                    crate::adapters::http_gateway_client::build_http_client(settings.engine_timeout())?;
                Some(Arc::new(crate::adapters::remote_engine::RemoteEngine::new(
                    client,
                    url.clone(),
                )))
            }
        };
        Ok(Self {
            engine,
            repository_url: settings.repository_url.clone(),
        })
    }
}

/// Router with only the API routes; used directly by tests.
pub fn build_api_router(state: AppState) -> Router {
    Router::new()
        .route(
            BACKTEST_PATH,
            post(handlers::run_backtest).fallback(handlers::method_not_allowed),
        )
        .route(
            INFO_PATH,
            get(handlers::service_info).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::not_found)
        .with_state(Arc::new(state))
}

pub fn build_router(state: AppState, settings: &GatewaySettings) -> Router {
    let mut router = build_api_router(state);
    if let Some(dir) = &settings.static_dir {
        router = router.nest_service("/static", ServeDir::new(dir));
    }
    if let Some(timeout) = settings.request_timeout {
        router = router
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                timeout,
            ))
            .layer(middleware::map_response(render_timeout));
    }
    router.layer(TraceLayer::new_for_http())
}

/// Gives the timeout layer's empty 408 the usual JSON error body.
async fn render_timeout(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        GatewayError::new(StatusCode::REQUEST_TIMEOUT, REQUEST_TIMEOUT_MESSAGE).into_response()
    } else {
        response
    }
}
