#![forbid(unsafe_code)]

use super::{ApiError, AppState};
use crate::assembler::{Assembler, DashboardError};
use dash_core::CancelToken;
use dash_storage::SqliteStore;
use std::sync::Arc;

/// Runs `job` on the blocking pool with its own reader connection.
///
/// When the deadline passes first, the token is cancelled (interrupting the
/// running statement) and the caller gets [`ApiError::Cancelled`]; the
/// abandoned job unwinds on its own.
pub(super) async fn run_read<T, F>(state: &AppState, job: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Assembler<'_>) -> Result<T, DashboardError> + Send + 'static,
{
    let cancel = CancelToken::new();
    let job_cancel = cancel.clone();
    let storage_dir = state.storage_dir.clone();
    let clock = Arc::clone(&state.clock);

    let handle = tokio::task::spawn_blocking(move || -> Result<T, DashboardError> {
        let store = SqliteStore::open_reader(&storage_dir)?;
        store.attach_cancel(&job_cancel);
        let assembler = Assembler::new(&store, clock.as_ref(), &job_cancel);
        job(&assembler)
    });

    match tokio::time::timeout(state.request_timeout, handle).await {
        Ok(Ok(result)) => result.map_err(ApiError::from),
        Ok(Err(join_err)) => Err(ApiError::Internal(join_err.to_string())),
        Err(_) => {
            cancel.cancel();
            tracing::warn!(
                timeout_ms = state.request_timeout.as_millis() as u64,
                "request deadline exceeded; read cancelled"
            );
            Err(ApiError::Cancelled)
        }
    }
}
