//! Interpretation of raw gateway replies.

use serde::{Deserialize, Serialize};

use super::error::FluxbackError;
use super::result::BacktestResult;
use super::unavailable::UnavailableResponse;

/// `{ "error": "..." }` body used by 4xx/5xx replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// A gateway reply the controller knows how to render.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayResponse {
    Completed(BacktestResult),
    Unavailable(UnavailableResponse),
    Rejected { status: u16, error: String },
}

/// Classify a reply by status and body.
///
/// Non-2xx replies are tried as an unavailability response first, then as an
/// error descriptor. Anything that fits neither is a transport failure.
pub fn interpret_reply(status: u16, body: &[u8]) -> Result<GatewayResponse, FluxbackError> {
    if (200..300).contains(&status) {
        let result: BacktestResult = serde_json::from_slice(body).map_err(FluxbackError::decode)?;
        result.validate()?;
        return Ok(GatewayResponse::Completed(result));
    }

    if let Ok(unavailable) = serde_json::from_slice::<UnavailableResponse>(body) {
        return Ok(GatewayResponse::Unavailable(unavailable));
    }
    if let Ok(ErrorBody { error }) = serde_json::from_slice::<ErrorBody>(body) {
        return Ok(GatewayResponse::Rejected { status, error });
    }

    Err(FluxbackError::Transport {
        reason: format!("gateway replied {status} without a readable body"),
    })
}
