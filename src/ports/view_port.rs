//! Render target driven by the controller.

use crate::domain::controller::DegradedReason;
use crate::domain::result::BacktestResult;

/// The two mutually exclusive render paths plus the trigger control.
pub trait ResultsView {
    fn set_trigger_enabled(&mut self, enabled: bool);
    fn clear(&mut self);
    fn show_processing(&mut self);
    fn show_results(&mut self, result: &BacktestResult);
    fn show_degraded(&mut self, reason: &DegradedReason);
}
