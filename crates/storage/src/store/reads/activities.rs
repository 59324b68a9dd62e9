#![forbid(unsafe_code)]

use super::super::{SqliteStore, StoreError};
use super::sql_limit;
use dash_core::{ActivityRecord, ActivityStatus};
use rusqlite::types::Type;
use rusqlite::{Row, params};

impl SqliteStore {
    pub fn recent_activities(&self, limit: usize) -> Result<Vec<ActivityRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT ts_ms, user_name, action, description, status
            FROM activities
            ORDER BY ts_ms DESC, id DESC
            LIMIT ?1
            "#,
        )?;
        let rows = stmt.query_map(params![sql_limit(Some(limit))], activity_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

fn activity_from_row(row: &Row<'_>) -> rusqlite::Result<ActivityRecord> {
    let raw_status: String = row.get(4)?;
    let status = ActivityStatus::parse(&raw_status).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            Type::Text,
            format!("unknown activity status: {raw_status}").into(),
        )
    })?;
    Ok(ActivityRecord {
        ts_ms: row.get(0)?,
        user_name: row.get(1)?,
        action: row.get(2)?,
        description: row.get(3)?,
        status,
    })
}
