//! Domain error types.

use std::fmt;

/// One of the two user-editable inputs of a backtest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Strategy,
    Data,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputField::Strategy => f.write_str("strategy"),
            InputField::Data => f.write_str("data"),
        }
    }
}

/// Top-level error type for fluxback.
#[derive(Debug, thiserror::Error)]
pub enum FluxbackError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("missing {field}")]
    MissingInput { field: InputField },

    #[error("invalid JSON body: {reason}")]
    InvalidJson { reason: String },

    #[error("transport error: {reason}")]
    Transport { reason: String },

    #[error("could not decode response: {reason}")]
    Decode { reason: String },

    #[error("invalid backtest result: {reason}")]
    InvalidResult { reason: String },

    #[error("backtest engine error: {reason}")]
    Engine { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FluxbackError {
    pub fn transport(err: impl fmt::Display) -> Self {
        Self::Transport {
            reason: err.to_string(),
        }
    }

    pub fn decode(err: impl fmt::Display) -> Self {
        Self::Decode {
            reason: err.to_string(),
        }
    }
}

impl From<&FluxbackError> for std::process::ExitCode {
    fn from(err: &FluxbackError) -> Self {
        let code: u8 = match err {
            FluxbackError::Io(_) => 1,
            FluxbackError::ConfigParse { .. }
            | FluxbackError::ConfigInvalid { .. }
            | FluxbackError::MissingInput { .. }
            | FluxbackError::InvalidJson { .. } => 2,
            FluxbackError::Engine { .. }
            | FluxbackError::Transport { .. }
            | FluxbackError::Decode { .. }
            | FluxbackError::InvalidResult { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
