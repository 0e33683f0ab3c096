//! HTTP adapter tests against mockito servers, plus an end-to-end run of the
//! controller against a live gateway.

mod common;

use fluxback::adapters::http_gateway_client::{HttpGatewayClient, build_http_client};
use fluxback::adapters::remote_engine::RemoteEngine;
use fluxback::adapters::sample_source::HttpSampleSource;
use fluxback::domain::error::FluxbackError;
use fluxback::domain::reply::GatewayResponse;
use fluxback::domain::request::BacktestRequest;
use fluxback::domain::result::BacktestResult;
use fluxback::domain::unavailable::UnavailableResponse;
use fluxback::ports::engine_port::EnginePort;
use fluxback::ports::gateway_port::GatewayPort;
use fluxback::ports::sample_port::SampleSource;
use mockito::Matcher;
use serde_json::json;
use std::time::Duration;

fn request() -> BacktestRequest {
    BacktestRequest::new("s", "d").unwrap()
}

mod gateway_client {
    use super::*;

    #[tokio::test]
    async fn posts_json_and_decodes_result() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/backtest")
            .match_body(Matcher::Json(json!({"strategy": "s", "data": "d"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&common::winning_result()).unwrap())
            .create_async()
            .await;

        let client = HttpGatewayClient::new(server.url(), None).unwrap();
        let reply = client.submit(&request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(reply, GatewayResponse::Completed(common::winning_result()));
    }

    #[tokio::test]
    async fn decodes_unavailable_reply() {
        let mut server = mockito::Server::new_async().await;
        let body = UnavailableResponse::new("https://example.invalid/r.git");
        server
            .mock("POST", "/api/backtest")
            .with_status(503)
            .with_body(serde_json::to_string(&body).unwrap())
            .create_async()
            .await;

        let client = HttpGatewayClient::new(format!("{}/", server.url()), None).unwrap();
        let reply = client.submit(&request()).await.unwrap();

        assert_eq!(reply, GatewayResponse::Unavailable(body));
    }

    #[tokio::test]
    async fn decodes_rejection() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/backtest")
            .with_status(400)
            .with_body(r#"{"error":"Missing strategy or data"}"#)
            .create_async()
            .await;

        let client = HttpGatewayClient::new(server.url(), None).unwrap();
        let reply = client.submit(&request()).await.unwrap();

        assert_eq!(
            reply,
            GatewayResponse::Rejected {
                status: 400,
                error: "Missing strategy or data".into()
            }
        );
    }

    #[tokio::test]
    async fn unreadable_error_body_is_transport_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/backtest")
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;

        let client = HttpGatewayClient::new(server.url(), None).unwrap();
        let err = client.submit(&request()).await.unwrap_err();
        assert!(matches!(err, FluxbackError::Transport { .. }));
    }

    #[tokio::test]
    async fn malformed_success_body_is_decode_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/backtest")
            .with_status(200)
            .with_body(r#"{"total_return_pct": 1.0}"#)
            .create_async()
            .await;

        let client = HttpGatewayClient::new(server.url(), None).unwrap();
        let err = client.submit(&request()).await.unwrap_err();
        assert!(matches!(err, FluxbackError::Decode { .. }));
    }

    #[tokio::test]
    async fn unreachable_gateway_is_transport_failure() {
        let client =
            HttpGatewayClient::new("http://127.0.0.1:1", Some(Duration::from_secs(2))).unwrap();
        let err = client.submit(&request()).await.unwrap_err();
        assert!(matches!(err, FluxbackError::Transport { .. }));
    }

    #[tokio::test]
    async fn fetches_service_descriptor() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/hello")
            .with_status(200)
            .with_body(
                json!({
                    "name": "FluxBack",
                    "description": "d",
                    "version": "0.1.0",
                    "endpoints": {"info": "/api/hello"}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = HttpGatewayClient::new(server.url(), None).unwrap();
        let info = client.service_info().await.unwrap();
        assert_eq!(info.name, "FluxBack");
        assert_eq!(info.endpoints["info"], "/api/hello");
    }
}

mod remote_engine {
    use super::*;

    #[tokio::test]
    async fn forwards_request_unmodified() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/run")
            .match_body(Matcher::Json(json!({"strategy": "s", "data": "d"})))
            .with_status(200)
            .with_body(serde_json::to_string(&BacktestResult::sample()).unwrap())
            .create_async()
            .await;

        let engine = RemoteEngine::new(build_http_client(None).unwrap(), format!("{}/run", server.url()));
        let result = engine.execute(&request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(result, BacktestResult::sample());
    }

    #[tokio::test]
    async fn engine_error_descriptor_becomes_engine_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/run")
            .with_status(422)
            .with_body(r#"{"error":"bad strategy syntax"}"#)
            .create_async()
            .await;

        let engine = RemoteEngine::new(build_http_client(None).unwrap(), format!("{}/run", server.url()));
        let err = engine.execute(&request()).await.unwrap_err();
        assert!(
            matches!(err, FluxbackError::Engine { ref reason } if reason == "bad strategy syntax")
        );
    }
}

mod sample_source {
    use super::*;

    #[tokio::test]
    async fn fetches_text_relative_to_base() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/static/demo/aapl_sample.csv")
            .with_status(200)
            .with_body("timestamp,close\n")
            .create_async()
            .await;

        let source = HttpSampleSource::new(
            build_http_client(None).unwrap(),
            format!("{}/static/", server.url()),
        );
        let text = source.fetch_text("demo/aapl_sample.csv").await.unwrap();
        assert_eq!(text, "timestamp,close\n");
    }

    #[tokio::test]
    async fn not_found_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/static/config/sma_demo.yaml")
            .with_status(404)
            .create_async()
            .await;

        let source = HttpSampleSource::new(
            build_http_client(None).unwrap(),
            format!("{}/static", server.url()),
        );
        assert!(source.fetch_text("config/sma_demo.yaml").await.is_err());
    }
}

#[cfg(feature = "web")]
mod end_to_end {
    use super::*;
    use common::{RecordingView, ViewEvent};
    use fluxback::adapters::web::{AppState, build_router};
    use fluxback::cli::{run_controller, sample_source};
    use fluxback::domain::controller::{Controller, DegradedReason, RunOutcome};
    use fluxback::domain::samples::SampleResources;
    use fluxback::domain::settings::{ClientSettings, EngineMode, GatewaySettings};
    use fluxback::domain::unavailable::UNAVAILABLE_ERROR;

    async fn spawn_gateway(static_dir: &std::path::Path) -> String {
        let settings = GatewaySettings {
            listen: "127.0.0.1:0".parse().unwrap(),
            engine: EngineMode::Unavailable,
            repository_url: "https://example.invalid/fluxback.git".into(),
            static_dir: Some(static_dir.to_path_buf()),
            request_timeout: Some(Duration::from_secs(5)),
        };
        let router = build_router(AppState::from_settings(&settings).unwrap(), &settings);
        let listener = tokio::net::TcpListener::bind(settings.listen).await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn controller_renders_unavailable_from_live_gateway() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("demo")).unwrap();
        std::fs::create_dir_all(dir.path().join("config")).unwrap();
        std::fs::write(dir.path().join("demo/aapl_sample.csv"), "timestamp,close\n1,2\n").unwrap();
        std::fs::write(dir.path().join("config/sma_demo.yaml"), "strategy:\n  name: live\n").unwrap();

        let api_url = spawn_gateway(dir.path()).await;
        let settings = ClientSettings {
            api_url: api_url.clone(),
            timeout: Some(Duration::from_secs(5)),
            samples: None,
            resources: SampleResources::default(),
        };
        let source = sample_source(&settings).unwrap();
        let gateway = HttpGatewayClient::new(&api_url, settings.timeout).unwrap();
        let mut controller = Controller::new(gateway, RecordingView::new());

        let outcome = run_controller(&mut controller, source.as_ref(), &settings, None, None)
            .await
            .unwrap();

        assert_eq!(controller.dataset(), "timestamp,close\n1,2\n");
        assert_eq!(controller.strategy(), "strategy:\n  name: live\n");
        let RunOutcome::Degraded(DegradedReason::Unavailable(resp)) = outcome else {
            panic!("expected unavailable outcome");
        };
        assert_eq!(resp.error, UNAVAILABLE_ERROR);
        assert_eq!(resp.sample_result.total_trades, 34);
        assert!(controller.view().trigger_enabled);
        assert_eq!(controller.view().count(&ViewEvent::Trigger(true)), 1);
    }
}
