#![allow(dead_code)]

use async_trait::async_trait;
use fluxback::domain::controller::DegradedReason;
use fluxback::domain::error::FluxbackError;
use fluxback::domain::reply::GatewayResponse;
use fluxback::domain::request::BacktestRequest;
use fluxback::domain::result::BacktestResult;
use fluxback::domain::service_info::ServiceDescriptor;
use fluxback::domain::unavailable::{DEFAULT_REPOSITORY_URL, UnavailableResponse};
use fluxback::ports::engine_port::EnginePort;
use fluxback::ports::gateway_port::GatewayPort;
use fluxback::ports::sample_port::SampleSource;
use fluxback::ports::view_port::ResultsView;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// What the mock gateway does with a submission.
#[derive(Debug, Clone)]
pub enum MockReply {
    Completed(BacktestResult),
    Unavailable,
    Rejected(u16, String),
    TransportError(String),
    Hang,
    Panic,
}

pub struct MockGateway {
    reply: MockReply,
    calls: AtomicUsize,
    last_request: Mutex<Option<BacktestRequest>>,
}

impl MockGateway {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<BacktestRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl GatewayPort for MockGateway {
    async fn submit(&self, request: &BacktestRequest) -> Result<GatewayResponse, FluxbackError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        match &self.reply {
            MockReply::Completed(result) => Ok(GatewayResponse::Completed(result.clone())),
            MockReply::Unavailable => Ok(GatewayResponse::Unavailable(UnavailableResponse::new(
                DEFAULT_REPOSITORY_URL,
            ))),
            MockReply::Rejected(status, error) => Ok(GatewayResponse::Rejected {
                status: *status,
                error: error.clone(),
            }),
            MockReply::TransportError(reason) => Err(FluxbackError::Transport {
                reason: reason.clone(),
            }),
            MockReply::Hang => std::future::pending().await,
            MockReply::Panic => panic!("gateway exploded"),
        }
    }

    async fn service_info(&self) -> Result<ServiceDescriptor, FluxbackError> {
        Ok(ServiceDescriptor::current(DEFAULT_REPOSITORY_URL))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Trigger(bool),
    Clear,
    Processing,
    Results(BacktestResult),
    Degraded(DegradedReason),
}

pub struct RecordingView {
    pub events: Vec<ViewEvent>,
    pub trigger_enabled: bool,
}

impl RecordingView {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            trigger_enabled: true,
        }
    }

    pub fn count(&self, wanted: &ViewEvent) -> usize {
        self.events.iter().filter(|e| *e == wanted).count()
    }

    pub fn last_panel(&self) -> Option<&ViewEvent> {
        self.events
            .iter()
            .rev()
            .find(|e| matches!(e, ViewEvent::Results(_) | ViewEvent::Degraded(_)))
    }
}

impl ResultsView for RecordingView {
    fn set_trigger_enabled(&mut self, enabled: bool) {
        self.trigger_enabled = enabled;
        self.events.push(ViewEvent::Trigger(enabled));
    }

    fn clear(&mut self) {
        self.events.push(ViewEvent::Clear);
    }

    fn show_processing(&mut self) {
        self.events.push(ViewEvent::Processing);
    }

    fn show_results(&mut self, result: &BacktestResult) {
        self.events.push(ViewEvent::Results(result.clone()));
    }

    fn show_degraded(&mut self, reason: &DegradedReason) {
        self.events.push(ViewEvent::Degraded(reason.clone()));
    }
}

/// In-memory sample resources; anything not registered is unavailable.
pub struct MockSampleSource {
    pub resources: HashMap<String, String>,
}

impl MockSampleSource {
    pub fn empty() -> Self {
        Self {
            resources: HashMap::new(),
        }
    }

    pub fn with(mut self, resource: &str, text: &str) -> Self {
        self.resources.insert(resource.to_string(), text.to_string());
        self
    }
}

#[async_trait]
impl SampleSource for MockSampleSource {
    async fn fetch_text(&self, resource: &str) -> Result<String, FluxbackError> {
        self.resources
            .get(resource)
            .cloned()
            .ok_or_else(|| FluxbackError::Transport {
                reason: format!("404 for {resource}"),
            })
    }
}

/// Engine double that records what it was asked to run.
pub struct MockEngine {
    result: Result<BacktestResult, String>,
    hang: bool,
    pub received: Mutex<Vec<BacktestRequest>>,
}

impl MockEngine {
    pub fn returning(result: BacktestResult) -> Self {
        Self {
            result: Ok(result),
            hang: false,
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            result: Err(reason.to_string()),
            hang: false,
            received: Mutex::new(Vec::new()),
        }
    }

    /// Accepts the request and never completes.
    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::returning(winning_result())
        }
    }
}

#[async_trait]
impl EnginePort for MockEngine {
    async fn execute(&self, request: &BacktestRequest) -> Result<BacktestResult, FluxbackError> {
        self.received.lock().unwrap().push(request.clone());
        if self.hang {
            std::future::pending::<()>().await;
        }
        self.result.clone().map_err(|reason| FluxbackError::Engine { reason })
    }
}

pub fn winning_result() -> BacktestResult {
    BacktestResult {
        total_return_pct: 12.5,
        sharpe_ratio: 1.8,
        win_rate_pct: 60.0,
        total_trades: 10,
        winning_trades: 6,
        losing_trades: 4,
        max_drawdown_pct: 4.2,
        profit_factor: 2.1,
        initial_cash: 100_000.0,
        final_cash: 112_500.0,
    }
}
