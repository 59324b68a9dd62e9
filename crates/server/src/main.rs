#![forbid(unsafe_code)]

use clap::Parser;
use dash_core::{Clock, SystemClock};
use dash_server::config::ServerConfig;
use dash_server::http::{self, AppState};
use dash_server::{build_fingerprint_static, logging};
use dash_storage::SqliteStore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let config = ServerConfig::parse();
    logging::init(config.log_format);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "dash_server stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Owner connection: creates and migrates the schema, then stays open for
    // the process lifetime so per-request readers always find an initialized
    // database.
    let mut store = SqliteStore::open(&config.storage_dir)?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    if let Some(seed) = config.seed {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let report = store.seed_demo_data(&mut rng, clock.now_ms())?;
        if report.skipped {
            info!(seed, "store already has sales; demo seeding skipped");
        } else {
            info!(
                seed,
                sales = report.sales,
                user_metrics = report.user_metrics,
                system_metrics = report.system_metrics,
                activities = report.activities,
                "seeded demo data"
            );
        }
    }

    let state = AppState::new(
        config.storage_dir.clone(),
        Arc::clone(&clock),
        config.request_timeout(),
    );
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(
        addr = %listener.local_addr()?,
        storage_dir = %config.storage_dir.display(),
        request_timeout_ms = config.request_timeout_ms,
        build = build_fingerprint_static(),
        "listening"
    );

    axum::serve(listener, http::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    drop(store);
    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(err) => {
            warn!(error = %err, "ctrl-c handler unavailable; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
