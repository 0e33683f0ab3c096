//! Built-in inputs substituted when the sample resources cannot be fetched.

pub const DEFAULT_SAMPLE_DATASET: &str = "demo/aapl_sample.csv";
pub const DEFAULT_SAMPLE_STRATEGY: &str = "config/sma_demo.yaml";

pub const FALLBACK_DATASET: &str = "timestamp,open,high,low,close,volume
2024-01-02T09:15:00,100.50,101.20,100.10,100.90,15000
2024-01-02T09:16:00,100.90,101.50,100.80,101.30,12000";

pub const FALLBACK_STRATEGY: &str = r#"strategy:
  name: sma_crossover_demo
  type: sma_crossover
  symbol: "AAPL"
  timeframe: 1m
  entry:
    fast: 10
    slow: 20
  exit:
    stop_loss_pct: 0.5
    take_profit_pct: 1.0
risk:
  position_size: 100
execution:
  slippage:
    type: adaptive
    base_ticks: 1
    vol_multiplier: 0.001"#;

/// Where a startup input came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOrigin {
    Resource,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleLoad {
    pub dataset: InputOrigin,
    pub strategy: InputOrigin,
}

/// Relative locations of the two sample resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleResources {
    pub dataset: String,
    pub strategy: String,
}

impl Default for SampleResources {
    fn default() -> Self {
        Self {
            dataset: DEFAULT_SAMPLE_DATASET.to_string(),
            strategy: DEFAULT_SAMPLE_STRATEGY.to_string(),
        }
    }
}
