#![forbid(unsafe_code)]

mod sql;

use super::StoreError;
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::BTreeSet;

pub(super) const SCHEMA_VERSION: i64 = 1;

const REQUIRED_TABLES: [&str; 5] = [
    "store_state",
    "sales",
    "user_metrics",
    "system_metrics",
    "activities",
];

/// Refuses to touch a database that was not created by this store (or by a
/// different schema version). An empty database passes.
pub(super) fn preflight_gate(conn: &Connection) -> Result<(), StoreError> {
    let tables = existing_tables(conn)?;
    if tables.is_empty() {
        return Ok(());
    }
    ensure_required_tables(&tables)?;
    ensure_schema_version(conn)
}

pub(super) fn install_schema(conn: &Connection, now_ms: i64) -> Result<(), StoreError> {
    conn.execute_batch(&sql::full_schema_sql())?;
    conn.execute(
        "INSERT INTO store_state(singleton, schema_version, created_at_ms, updated_at_ms) \
         VALUES (1, ?1, ?2, ?2) \
         ON CONFLICT(singleton) DO UPDATE SET updated_at_ms=excluded.updated_at_ms",
        params![SCHEMA_VERSION, now_ms],
    )?;
    Ok(())
}

/// Used by read-only connections, which must never create tables.
pub(super) fn verify_installed(conn: &Connection) -> Result<(), StoreError> {
    let tables = existing_tables(conn)?;
    if tables.is_empty() {
        return Err(StoreError::InvalidInput(
            "store is not initialized; start the server once to create it",
        ));
    }
    ensure_required_tables(&tables)?;
    ensure_schema_version(conn)
}

fn existing_tables(conn: &Connection) -> Result<BTreeSet<String>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
    )?;
    let mut rows = stmt.query([])?;
    let mut tables = BTreeSet::new();
    while let Some(row) = rows.next()? {
        tables.insert(row.get::<_, String>(0)?);
    }
    Ok(tables)
}

fn ensure_required_tables(tables: &BTreeSet<String>) -> Result<(), StoreError> {
    if tables
        .iter()
        .any(|table| !REQUIRED_TABLES.contains(&table.as_str()))
    {
        return Err(StoreError::InvalidInput(
            "RESET_REQUIRED: unsupported tables detected",
        ));
    }
    for table in REQUIRED_TABLES {
        if !tables.contains(table) {
            return Err(StoreError::InvalidInput(
                "RESET_REQUIRED: required table is missing",
            ));
        }
    }
    Ok(())
}

fn ensure_schema_version(conn: &Connection) -> Result<(), StoreError> {
    let version = conn
        .query_row(
            "SELECT schema_version FROM store_state WHERE singleton=1",
            [],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;

    match version {
        Some(v) if v == SCHEMA_VERSION => Ok(()),
        Some(_) => Err(StoreError::InvalidInput(
            "RESET_REQUIRED: schema version mismatch",
        )),
        None => Err(StoreError::InvalidInput(
            "RESET_REQUIRED: schema state row is missing",
        )),
    }
}
