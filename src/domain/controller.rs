//! Client controller.
//!
//! Owns the two editable inputs and drives exactly one backtest at a time:
//!
//! ```text
//! Idle -> Submitting -> RenderingSuccess  -> Idle
//!                    \-> RenderingDegraded -> Idle
//! ```
//!
//! The trigger control is disabled on entry to `Submitting` and re-enabled by
//! a drop guard, so it comes back exactly once whether the run completes,
//! panics, or the run future is dropped while awaiting the gateway.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::error::{FluxbackError, InputField};
use super::reply::GatewayResponse;
use super::request::BacktestRequest;
use super::result::BacktestResult;
use super::samples::{FALLBACK_DATASET, FALLBACK_STRATEGY, InputOrigin, SampleLoad, SampleResources};
use super::unavailable::UnavailableResponse;
use crate::ports::gateway_port::GatewayPort;
use crate::ports::sample_port::SampleSource;
use crate::ports::view_port::ResultsView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Submitting,
    RenderingSuccess,
    RenderingDegraded,
}

/// Why the degraded panel is shown instead of results.
#[derive(Debug, Clone, PartialEq)]
pub enum DegradedReason {
    /// An input was empty; no request was sent.
    MissingInput { field: InputField },
    /// The gateway has no engine in this deployment.
    Unavailable(UnavailableResponse),
    /// The gateway refused the request with an error descriptor.
    Rejected { status: u16, error: String },
    /// The gateway could not be reached or its reply was unreadable.
    ApiNotAvailable { detail: String },
}

impl DegradedReason {
    pub fn headline(&self) -> String {
        match self {
            DegradedReason::MissingInput { field } => {
                format!("Cannot run backtest: {field} is empty")
            }
            DegradedReason::Unavailable(resp) => resp.error.clone(),
            DegradedReason::Rejected { status, error } => {
                format!("Backtest rejected ({status}): {error}")
            }
            DegradedReason::ApiNotAvailable { .. } => "API not available".to_string(),
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        let code: u8 = match self {
            DegradedReason::MissingInput { .. } => 2,
            DegradedReason::Unavailable(_) => 3,
            DegradedReason::Rejected { .. } => 4,
            DegradedReason::ApiNotAvailable { .. } => 5,
        };
        ExitCode::from(code)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Success(BacktestResult),
    Degraded(DegradedReason),
}

pub struct Controller<G, V> {
    gateway: G,
    view: V,
    state: ControllerState,
    strategy: String,
    dataset: String,
    pending_upload: Option<JoinHandle<Result<String, FluxbackError>>>,
}

impl<G: GatewayPort, V: ResultsView> Controller<G, V> {
    pub fn new(gateway: G, view: V) -> Self {
        Self {
            gateway,
            view,
            state: ControllerState::Idle,
            strategy: String::new(),
            dataset: String::new(),
            pending_upload: None,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn strategy(&self) -> &str {
        &self.strategy
    }

    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    pub fn set_strategy(&mut self, text: impl Into<String>) {
        self.strategy = text.into();
    }

    pub fn set_dataset(&mut self, text: impl Into<String>) {
        self.dataset = text.into();
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Populate both inputs from the sample resources.
    ///
    /// Both fetches run concurrently. A resource that cannot be fetched is
    /// replaced by its built-in literal; this never fails.
    pub async fn load_samples(
        &mut self,
        source: &dyn SampleSource,
        resources: &SampleResources,
    ) -> SampleLoad {
        let (dataset, strategy) = tokio::join!(
            source.fetch_text(&resources.dataset),
            source.fetch_text(&resources.strategy),
        );

        let (dataset, dataset_origin) = or_fallback(dataset, &resources.dataset, FALLBACK_DATASET);
        let (strategy, strategy_origin) =
            or_fallback(strategy, &resources.strategy, FALLBACK_STRATEGY);

        self.dataset = dataset;
        self.strategy = strategy;

        SampleLoad {
            dataset: dataset_origin,
            strategy: strategy_origin,
        }
    }

    /// Begin reading `path` into the dataset field.
    ///
    /// Starting another upload before this one is collected aborts it; only
    /// the latest upload can land in the field. Fails without touching any
    /// pending upload when called outside a Tokio runtime.
    pub fn start_upload(&mut self, path: impl Into<PathBuf>) -> Result<(), FluxbackError> {
        let runtime = Handle::try_current().map_err(std::io::Error::other)?;
        let path = path.into();
        let read = runtime.spawn(async move { read_input_file(&path).await });
        if let Some(previous) = self.pending_upload.replace(read) {
            tracing::debug!("replacing pending dataset upload");
            previous.abort();
        }
        Ok(())
    }

    /// Wait for the latest upload and assign it to the dataset field.
    ///
    /// Returns `Ok(false)` when no upload was pending.
    pub async fn complete_upload(&mut self) -> Result<bool, FluxbackError> {
        let Some(read) = self.pending_upload.take() else {
            return Ok(false);
        };
        let text = read.await.map_err(|e| FluxbackError::Io(std::io::Error::other(e)))??;
        tracing::info!(bytes = text.len(), "dataset uploaded");
        self.dataset = text;
        Ok(true)
    }

    /// Run one backtest with the current inputs and render the outcome.
    pub async fn run_backtest(&mut self) -> RunOutcome {
        let mut submission = Submission::begin(&mut self.view, &mut self.state);

        let outcome = match BacktestRequest::new(self.strategy.as_str(), self.dataset.as_str()) {
            Ok(request) => submit(&self.gateway, &request).await,
            Err(FluxbackError::MissingInput { field }) => {
                tracing::warn!(%field, "input is empty, not sending request");
                RunOutcome::Degraded(DegradedReason::MissingInput { field })
            }
            Err(err) => RunOutcome::Degraded(DegradedReason::ApiNotAvailable {
                detail: err.to_string(),
            }),
        };

        submission.render(&outcome);
        outcome
    }
}

async fn submit<G: GatewayPort>(gateway: &G, request: &BacktestRequest) -> RunOutcome {
    tracing::info!(
        strategy_bytes = request.strategy.len(),
        data_bytes = request.data.len(),
        "submitting backtest"
    );
    match gateway.submit(request).await {
        Ok(GatewayResponse::Completed(result)) => RunOutcome::Success(result),
        Ok(GatewayResponse::Unavailable(resp)) => {
            tracing::info!(error = %resp.error, "backtest engine unavailable");
            RunOutcome::Degraded(DegradedReason::Unavailable(resp))
        }
        Ok(GatewayResponse::Rejected { status, error }) => {
            tracing::warn!(status, %error, "backtest rejected");
            RunOutcome::Degraded(DegradedReason::Rejected { status, error })
        }
        Err(err) => {
            tracing::warn!(error = %err, "backtest request failed");
            RunOutcome::Degraded(DegradedReason::ApiNotAvailable {
                detail: err.to_string(),
            })
        }
    }
}

/// Read a user-supplied input file as text.
///
/// Strategy and dataset files are both decoded lossily: invalid UTF-8
/// becomes U+FFFD rather than an error, since the engine owns parsing.
pub async fn read_input_file(path: &Path) -> Result<String, FluxbackError> {
    let bytes = tokio::fs::read(path).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn or_fallback(
    fetched: Result<String, FluxbackError>,
    resource: &str,
    fallback: &str,
) -> (String, InputOrigin) {
    match fetched {
        Ok(text) => (text, InputOrigin::Resource),
        Err(err) => {
            tracing::warn!(resource, error = %err, "sample resource unavailable, using built-in");
            (fallback.to_string(), InputOrigin::Fallback)
        }
    }
}

/// Lifetime of the `Submitting` phase. Dropping it restores `Idle`.
struct Submission<'a, V: ResultsView> {
    view: &'a mut V,
    state: &'a mut ControllerState,
}

impl<'a, V: ResultsView> Submission<'a, V> {
    fn begin(view: &'a mut V, state: &'a mut ControllerState) -> Self {
        view.set_trigger_enabled(false);
        view.clear();
        view.show_processing();
        *state = ControllerState::Submitting;
        Self { view, state }
    }

    fn render(&mut self, outcome: &RunOutcome) {
        self.view.clear();
        match outcome {
            RunOutcome::Success(result) => {
                *self.state = ControllerState::RenderingSuccess;
                self.view.show_results(result);
            }
            RunOutcome::Degraded(reason) => {
                *self.state = ControllerState::RenderingDegraded;
                self.view.show_degraded(reason);
            }
        }
    }
}

impl<V: ResultsView> Drop for Submission<'_, V> {
    fn drop(&mut self) {
        self.view.set_trigger_enabled(true);
        *self.state = ControllerState::Idle;
    }
}
