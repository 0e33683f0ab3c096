//! fluxback: client orchestration and gateway for an external backtest engine.
//!
//! Hexagonal layout: records and the controller state machine in [`domain`],
//! port traits in [`ports`], concrete implementations in [`adapters`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod ports;
