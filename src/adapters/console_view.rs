//! Plain-text results view for terminals.

use std::fmt::Write as _;
use std::io::Write;

use crate::domain::controller::DegradedReason;
use crate::domain::result::BacktestResult;
use crate::ports::view_port::ResultsView;

pub const PROCESSING_TEXT: &str = "Processing backtest...";

/// Metrics grid followed by trade statistics.
pub fn render_metrics_grid(result: &BacktestResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Backtest Results ===");
    let _ = writeln!(out, "Total Return:     {:.2}%", result.total_return_pct);
    let _ = writeln!(out, "Sharpe Ratio:     {:.2}", result.sharpe_ratio);
    let _ = writeln!(out, "Win Rate:         {:.2}%", result.win_rate_pct);
    let _ = writeln!(out, "Total Trades:     {}", result.total_trades);
    let _ = writeln!(out, "Max Drawdown:     {:.2}%", result.max_drawdown_pct);
    let _ = writeln!(out, "Profit Factor:    {:.2}", result.profit_factor);
    let _ = writeln!(out);
    let _ = writeln!(out, "=== Trade Statistics ===");
    let _ = writeln!(
        out,
        "Winning Trades: {} | Losing Trades: {}",
        result.winning_trades, result.losing_trades
    );
    let _ = writeln!(
        out,
        "Initial Cash: ${:.2} -> Final Cash: ${:.2}",
        result.initial_cash, result.final_cash
    );
    out
}

/// Recovery panel shown whenever results cannot be displayed.
pub fn render_degraded_panel(reason: &DegradedReason) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Online Backtesting Not Available ===");
    let _ = writeln!(out, "{}", reason.headline());

    match reason {
        DegradedReason::Unavailable(resp) => {
            let _ = writeln!(out, "{}", resp.message);
            let _ = writeln!(out);
            let _ = writeln!(out, "Recovery options:");
            let _ = writeln!(out, "  local:       {}", resp.instructions.local);
            let _ = writeln!(out, "  webassembly: {}", resp.instructions.webassembly);
        }
        DegradedReason::ApiNotAvailable { detail } => {
            let _ = writeln!(out, "({detail})");
        }
        DegradedReason::MissingInput { .. } | DegradedReason::Rejected { .. } => {}
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "To run locally:");
    let _ = writeln!(out, "  1. Clone the repository and build the engine");
    let _ = writeln!(
        out,
        "  2. fluxback run --strategy config/sma_demo.yaml --data demo/aapl_sample.csv --out results/demo.json"
    );
    out
}

/// Writes rendered panels to `out`. The trigger state is tracked for
/// inspection only; a terminal has no button to grey out.
pub struct ConsoleView<W: Write> {
    out: W,
    trigger_enabled: bool,
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            trigger_enabled: true,
        }
    }

    pub fn trigger_enabled(&self) -> bool {
        self.trigger_enabled
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::warn!(error = %e, "failed to write to console");
        }
    }
}

impl<W: Write> ResultsView for ConsoleView<W> {
    fn set_trigger_enabled(&mut self, enabled: bool) {
        tracing::debug!(enabled, "run trigger");
        self.trigger_enabled = enabled;
    }

    fn clear(&mut self) {}

    fn show_processing(&mut self) {
        tracing::info!("{PROCESSING_TEXT}");
    }

    fn show_results(&mut self, result: &BacktestResult) {
        self.emit(&render_metrics_grid(result));
    }

    fn show_degraded(&mut self, reason: &DegradedReason) {
        self.emit(&render_degraded_panel(reason));
    }
}
