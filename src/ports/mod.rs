//! Port traits: the seams between orchestration logic and the outside world.

pub mod config_port;
pub mod engine_port;
pub mod gateway_port;
pub mod sample_port;
pub mod view_port;
