//! Concrete adapter implementations for ports.

pub mod console_view;
pub mod file_config_adapter;
pub mod http_gateway_client;
pub mod remote_engine;
pub mod sample_source;
#[cfg(feature = "web")]
pub mod web;
