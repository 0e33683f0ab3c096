//! Backtest request: an opaque strategy definition paired with an opaque dataset.
//!
//! Neither payload is parsed here. The only rule this layer enforces is that
//! both are present and non-empty; interpreting them is the engine's job.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{FluxbackError, InputField};

/// Serialized strategy configuration (name, type, symbol, entry/exit rules...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategyDefinition(String);

/// Tabular OHLCV time series as plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketDataset(String);

macro_rules! opaque_text {
    ($ty:ident) => {
        impl $ty {
            pub fn new(text: impl Into<String>) -> Self {
                Self(text.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }
        }
    };
}

opaque_text!(StrategyDefinition);
opaque_text!(MarketDataset);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacktestRequest {
    pub strategy: StrategyDefinition,
    pub data: MarketDataset,
}

impl BacktestRequest {
    /// Build a request, failing fast when either input is empty.
    pub fn new(
        strategy: impl Into<String>,
        data: impl Into<String>,
    ) -> Result<Self, FluxbackError> {
        let strategy = StrategyDefinition::new(strategy);
        let data = MarketDataset::new(data);
        if strategy.is_empty() {
            return Err(FluxbackError::MissingInput {
                field: InputField::Strategy,
            });
        }
        if data.is_empty() {
            return Err(FluxbackError::MissingInput {
                field: InputField::Data,
            });
        }
        Ok(Self { strategy, data })
    }

    /// Decode an inbound request body.
    ///
    /// The body must be a JSON object whose `strategy` and `data` members are
    /// non-empty strings. Any other member is ignored.
    pub fn from_json(body: &[u8]) -> Result<Self, FluxbackError> {
        let value: Value = serde_json::from_slice(body).map_err(|e| FluxbackError::InvalidJson {
            reason: e.to_string(),
        })?;

        let text_member = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Self::new(text_member("strategy"), text_member("data"))
    }
}
