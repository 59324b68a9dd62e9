#![forbid(unsafe_code)]

use super::super::{SqliteStore, StoreError};
use super::sql_limit;
use dash_core::{UserMetricRecord, UserPoint};
use rusqlite::{OptionalExtension, Row, params};

impl SqliteStore {
    /// The metric with the greatest date. Rows sharing that date resolve to
    /// the one ingested last.
    pub fn latest_user_metric(&self) -> Result<Option<UserMetricRecord>, StoreError> {
        Ok(self
            .conn
            .query_row(
                r#"
                SELECT date_ms, active_users, new_signups, page_views, bounce_rate
                FROM user_metrics
                ORDER BY date_ms DESC, id DESC
                LIMIT 1
                "#,
                [],
                user_metric_from_row,
            )
            .optional()?)
    }

    pub fn recent_user_metrics(&self, limit: usize) -> Result<Vec<UserMetricRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT date_ms, active_users, new_signups, page_views, bounce_rate
            FROM user_metrics
            ORDER BY date_ms DESC, id DESC
            LIMIT ?1
            "#,
        )?;
        let rows = stmt.query_map(params![sql_limit(Some(limit))], user_metric_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn user_series(&self) -> Result<Vec<UserPoint>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT date_ms, active_users, new_signups
            FROM user_metrics
            ORDER BY date_ms ASC, id ASC
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(UserPoint {
                date_ms: row.get(0)?,
                active_users: row.get(1)?,
                new_signups: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

fn user_metric_from_row(row: &Row<'_>) -> rusqlite::Result<UserMetricRecord> {
    Ok(UserMetricRecord {
        date_ms: row.get(0)?,
        active_users: row.get(1)?,
        new_signups: row.get(2)?,
        page_views: row.get(3)?,
        bounce_rate: row.get(4)?,
    })
}
