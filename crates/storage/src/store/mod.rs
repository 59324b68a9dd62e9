#![forbid(unsafe_code)]

mod error;
mod ingest;
mod reads;
mod schema;
mod seed;
mod types;

pub use error::StoreError;
pub use seed::*;
pub use types::*;

use dash_core::CancelToken;
use dash_core::timestamps::now_ms_i64;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::Duration;

const DB_FILE_NAME: &str = "dashboard.db";
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed metrics store. One value wraps one connection; readers for
/// concurrent requests each open their own.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (creating if needed) the store under `storage_dir` and installs
    /// the schema.
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref();
        std::fs::create_dir_all(storage_dir)?;

        let conn = Connection::open(storage_dir.join(DB_FILE_NAME))?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        schema::preflight_gate(&conn)?;
        schema::install_schema(&conn, now_ms_i64())?;

        Ok(Self { conn })
    }

    /// Opens an existing store for queries only (`PRAGMA query_only`). Never
    /// creates or migrates tables.
    pub fn open_reader(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db_path = storage_dir.as_ref().join(DB_FILE_NAME);
        if !db_path.is_file() {
            return Err(StoreError::InvalidInput(
                "store is not initialized; start the server once to create it",
            ));
        }

        let conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.pragma_update(None, "query_only", true)?;
        schema::verify_installed(&conn)?;

        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        schema::install_schema(&conn, now_ms_i64())?;
        Ok(Self { conn })
    }

    /// Ties this connection to `cancel`: cancelling interrupts whatever
    /// statement is running, which then fails with [`StoreError::Cancelled`].
    pub fn attach_cancel(&self, cancel: &CancelToken) {
        let handle = self.conn.get_interrupt_handle();
        cancel.on_cancel(move || handle.interrupt());
    }

    pub fn table_counts(&self) -> Result<TableCounts, StoreError> {
        Ok(self.conn.query_row(
            r#"
            SELECT
              (SELECT COUNT(*) FROM sales),
              (SELECT COUNT(*) FROM user_metrics),
              (SELECT COUNT(*) FROM system_metrics),
              (SELECT COUNT(*) FROM activities)
            "#,
            [],
            |row| {
                Ok(TableCounts {
                    sales: row.get(0)?,
                    user_metrics: row.get(1)?,
                    system_metrics: row.get(2)?,
                    activities: row.get(3)?,
                })
            },
        )?)
    }
}
