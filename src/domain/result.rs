//! Backtest result record returned by the engine.

use serde::{Deserialize, Deserializer, Serialize};

use super::error::FluxbackError;

/// Fixed-shape performance summary.
///
/// Percentage fields are already scaled: `23.53` means 23.53%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub total_return_pct: f64,
    pub sharpe_ratio: f64,
    pub win_rate_pct: f64,
    #[serde(deserialize_with = "deserialize_count")]
    pub total_trades: u64,
    #[serde(deserialize_with = "deserialize_count")]
    pub winning_trades: u64,
    #[serde(deserialize_with = "deserialize_count")]
    pub losing_trades: u64,
    pub max_drawdown_pct: f64,
    pub profit_factor: f64,
    pub initial_cash: f64,
    pub final_cash: f64,
}

impl BacktestResult {
    /// Illustrative result shipped with every unavailability response.
    pub fn sample() -> Self {
        Self {
            total_return_pct: -0.02,
            sharpe_ratio: -6.24,
            win_rate_pct: 23.53,
            total_trades: 34,
            winning_trades: 8,
            losing_trades: 26,
            max_drawdown_pct: 0.02,
            profit_factor: 0.22,
            initial_cash: 100_000.0,
            final_cash: 99_980.72,
        }
    }

    pub fn validate(&self) -> Result<(), FluxbackError> {
        let fields = [
            ("total_return_pct", self.total_return_pct),
            ("sharpe_ratio", self.sharpe_ratio),
            ("win_rate_pct", self.win_rate_pct),
            ("max_drawdown_pct", self.max_drawdown_pct),
            ("profit_factor", self.profit_factor),
            ("initial_cash", self.initial_cash),
            ("final_cash", self.final_cash),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(FluxbackError::InvalidResult {
                reason: format!("{name} is not finite"),
            });
        }
        if self.max_drawdown_pct < 0.0 {
            return Err(FluxbackError::InvalidResult {
                reason: "max_drawdown_pct is negative".into(),
            });
        }
        let closed = self.winning_trades.checked_add(self.losing_trades);
        if closed.is_none_or(|n| n > self.total_trades) {
            return Err(FluxbackError::InvalidResult {
                reason: format!(
                    "winning_trades ({}) + losing_trades ({}) exceeds total_trades ({})",
                    self.winning_trades, self.losing_trades, self.total_trades
                ),
            });
        }
        Ok(())
    }
}

/// Largest integer an `f64` represents exactly.
const MAX_EXACT_FLOAT_COUNT: f64 = 9_007_199_254_740_992.0;

/// Accepts `34` as well as `34.0`; rejects negative or fractional counts and
/// floats too large to hold an exact integer.
fn deserialize_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(n) = number.as_u64() {
        return Ok(n);
    }
    match number.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= MAX_EXACT_FLOAT_COUNT => Ok(f as u64),
        _ => Err(D::Error::custom(format!(
            "expected a non-negative integer count, got {number}"
        ))),
    }
}
