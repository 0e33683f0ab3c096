//! Core records, reply interpretation, settings and the client controller.

pub mod controller;
pub mod error;
pub mod reply;
pub mod request;
pub mod result;
pub mod samples;
pub mod service_info;
pub mod settings;
pub mod unavailable;
