//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::console_view::{ConsoleView, render_metrics_grid};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::http_gateway_client::{HttpGatewayClient, build_http_client};
use crate::adapters::sample_source::{DirectorySampleSource, HttpSampleSource};
use crate::domain::controller::{Controller, RunOutcome, read_input_file};
use crate::domain::error::FluxbackError;
use crate::domain::result::BacktestResult;
use crate::domain::settings::{ClientSettings, GatewaySettings, SampleLocation};
use crate::ports::gateway_port::GatewayPort;
use crate::ports::sample_port::SampleSource;

#[derive(Parser, Debug)]
#[command(name = "fluxback", about = "Backtest gateway and client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Default)]
pub struct ClientArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Gateway base URL, overriding [client] api_url
    #[arg(long)]
    pub api_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the backtest gateway
    Serve {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Submit one backtest and render the outcome
    Run {
        #[command(flatten)]
        client: ClientArgs,
        /// Strategy file; defaults to the sample strategy
        #[arg(short, long)]
        strategy: Option<PathBuf>,
        /// Dataset file; defaults to the sample dataset
        #[arg(short, long)]
        data: Option<PathBuf>,
        /// Write the result JSON here on success
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print the gateway's service descriptor
    Info {
        #[command(flatten)]
        client: ClientArgs,
    },
    /// Render a saved result file
    Stats {
        #[arg(short, long)]
        results: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    init_tracing();
    match cli.command {
        Command::Serve { config } => run_serve(config.as_deref()),
        Command::Run {
            client,
            strategy,
            data,
            out,
        } => run_client(&client, strategy.as_deref(), data.as_deref(), out.as_deref()),
        Command::Info { client } => run_info(&client),
        Command::Stats { results } => run_stats(&results),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fluxback=info,tower_http=info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn report(err: &FluxbackError) -> ExitCode {
    tracing::error!("{err}");
    ExitCode::from(err)
}

pub fn load_config(path: Option<&Path>) -> Result<FileConfigAdapter, FluxbackError> {
    match path {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            FileConfigAdapter::from_file(path)
        }
        None => Ok(FileConfigAdapter::default()),
    }
}

pub fn load_client_settings(args: &ClientArgs) -> Result<ClientSettings, FluxbackError> {
    let config = load_config(args.config.as_deref())?;
    let settings = ClientSettings::from_config(&config)?;
    Ok(match &args.api_url {
        Some(url) => settings.with_api_url(url),
        None => settings,
    })
}

fn build_runtime() -> Result<tokio::runtime::Runtime, FluxbackError> {
    Ok(tokio::runtime::Runtime::new()?)
}

pub fn sample_source(settings: &ClientSettings) -> Result<Box<dyn SampleSource>, FluxbackError> {
    Ok(match settings.sample_location() {
        SampleLocation::Http { base_url } => Box::new(HttpSampleSource::new(
            build_http_client(settings.timeout)?,
            base_url,
        )),
        SampleLocation::Directory { path } => Box::new(DirectorySampleSource::new(path)),
    })
}

fn run_client(
    args: &ClientArgs,
    strategy: Option<&Path>,
    data: Option<&Path>,
    out: Option<&Path>,
) -> ExitCode {
    let settings = match load_client_settings(args) {
        Ok(s) => s,
        Err(e) => return report(&e),
    };
    let runtime = match build_runtime() {
        Ok(rt) => rt,
        Err(e) => return report(&e),
    };

    let outcome = runtime.block_on(async {
        let gateway = HttpGatewayClient::new(&settings.api_url, settings.timeout)?;
        let source = sample_source(&settings)?;
        let mut controller = Controller::new(gateway, ConsoleView::new(std::io::stdout()));
        run_controller(&mut controller, source.as_ref(), &settings, strategy, data).await
    });

    match outcome {
        Ok(RunOutcome::Success(result)) => match out {
            Some(path) => match write_result(path, &result) {
                Ok(()) => {
                    tracing::info!("Result written to {}", path.display());
                    ExitCode::SUCCESS
                }
                Err(e) => report(&e),
            },
            None => ExitCode::SUCCESS,
        },
        Ok(RunOutcome::Degraded(reason)) => reason.exit_code(),
        Err(e) => report(&e),
    }
}

/// Startup, optional input overrides, then a single run.
pub async fn run_controller<G, V>(
    controller: &mut Controller<G, V>,
    source: &dyn SampleSource,
    settings: &ClientSettings,
    strategy: Option<&Path>,
    data: Option<&Path>,
) -> Result<RunOutcome, FluxbackError>
where
    G: GatewayPort,
    V: crate::ports::view_port::ResultsView,
{
    let load = controller.load_samples(source, &settings.resources).await;
    tracing::debug!(?load, "startup inputs ready");

    if let Some(path) = strategy {
        controller.set_strategy(read_input_file(path).await?);
    }
    if let Some(path) = data {
        controller.start_upload(path)?;
        controller.complete_upload().await?;
    }

    Ok(controller.run_backtest().await)
}

pub fn write_result(path: &Path, result: &BacktestResult) -> Result<(), FluxbackError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(result).map_err(std::io::Error::other)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn read_result(path: &Path) -> Result<BacktestResult, FluxbackError> {
    let text = fs::read_to_string(path)?;
    let result: BacktestResult = serde_json::from_str(&text).map_err(FluxbackError::decode)?;
    result.validate()?;
    Ok(result)
}

fn run_info(args: &ClientArgs) -> ExitCode {
    let settings = match load_client_settings(args) {
        Ok(s) => s,
        Err(e) => return report(&e),
    };
    let runtime = match build_runtime() {
        Ok(rt) => rt,
        Err(e) => return report(&e),
    };

    let info = runtime.block_on(async {
        HttpGatewayClient::new(&settings.api_url, settings.timeout)?
            .service_info()
            .await
    });
    match info.and_then(|i| serde_json::to_string_pretty(&i).map_err(FluxbackError::decode)) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

fn run_stats(results: &Path) -> ExitCode {
    match read_result(results) {
        Ok(result) => {
            print!("{}", render_metrics_grid(&result));
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

fn run_serve(config_path: Option<&Path>) -> ExitCode {
    let settings = match load_config(config_path).and_then(|c| GatewaySettings::from_config(&c)) {
        Ok(s) => s,
        Err(e) => return report(&e),
    };

    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{AppState, build_router};

        let state = match AppState::from_settings(&settings) {
            Ok(s) => s,
            Err(e) => return report(&e),
        };
        let runtime = match build_runtime() {
            Ok(rt) => rt,
            Err(e) => return report(&e),
        };

        tracing::info!(
            listen = %settings.listen,
            engine = ?settings.engine,
            "starting gateway"
        );
        let router = build_router(state, &settings);

        let served: Result<(), FluxbackError> = runtime.block_on(async {
            let listener = tokio::net::TcpListener::bind(settings.listen).await?;
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
            Ok(())
        });

        match served {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => report(&e),
        }
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = settings;
        tracing::error!("web feature is required for serve");
        ExitCode::from(1)
    }
}

#[cfg(feature = "web")]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down gateway");
}
