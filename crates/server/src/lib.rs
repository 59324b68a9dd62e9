#![forbid(unsafe_code)]

//! Metrics dashboard server: read-model assembly, HTTP surface, runtime
//! configuration and logging.

pub mod assembler;
mod build_info;
pub mod config;
pub mod http;
pub mod logging;
pub mod view;

pub use build_info::{SERVER_VERSION, build_fingerprint_static};
