#![forbid(unsafe_code)]

//! HTTP surface. Handlers stay thin: each one runs an [`Assembler`] call on
//! the blocking pool against a fresh read-only connection and maps the
//! outcome to a response.
//!
//! [`Assembler`]: crate::assembler::Assembler

mod error;
mod handlers;
mod reader;

pub use error::ApiError;

use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use dash_core::Clock;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct AppState {
    storage_dir: PathBuf,
    clock: Arc<dyn Clock>,
    request_timeout: Duration,
}

impl AppState {
    pub fn new(storage_dir: PathBuf, clock: Arc<dyn Clock>, request_timeout: Duration) -> Self {
        Self {
            storage_dir,
            clock,
            request_timeout,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::summary))
        .route("/chart", get(handlers::chart))
        .route("/activities", get(handlers::activities))
        .route("/healthz", get(handlers::healthz))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    response
}
