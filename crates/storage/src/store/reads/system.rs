#![forbid(unsafe_code)]

use super::super::{SortOrder, SqliteStore, StoreError};
use super::sql_limit;
use dash_core::{SystemMetricRecord, SystemPoint};
use rusqlite::{Row, params};

impl SqliteStore {
    /// Samples with `ts_ms >= since_ms`, at most `limit` of them.
    pub fn system_metrics_since(
        &self,
        since_ms: i64,
        order: SortOrder,
        limit: Option<usize>,
    ) -> Result<Vec<SystemMetricRecord>, StoreError> {
        let direction = order.sql();
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT ts_ms, cpu_usage_pct, mem_usage_pct, disk_usage_pct, active_connections, response_time_ms
            FROM system_metrics
            WHERE ts_ms >= ?1
            ORDER BY ts_ms {direction}, id {direction}
            LIMIT ?2
            "#
        ))?;
        let rows = stmt.query_map(
            params![since_ms, sql_limit(limit)],
            system_metric_from_row,
        )?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Chart points for the window, oldest first.
    pub fn system_series_since(&self, since_ms: i64) -> Result<Vec<SystemPoint>, StoreError> {
        Ok(self
            .system_metrics_since(since_ms, SortOrder::Ascending, None)?
            .into_iter()
            .map(|metric| SystemPoint {
                ts_ms: metric.ts_ms,
                cpu_usage_pct: metric.cpu_usage_pct,
                mem_usage_pct: metric.mem_usage_pct,
            })
            .collect())
    }
}

fn system_metric_from_row(row: &Row<'_>) -> rusqlite::Result<SystemMetricRecord> {
    Ok(SystemMetricRecord {
        ts_ms: row.get(0)?,
        cpu_usage_pct: row.get(1)?,
        mem_usage_pct: row.get(2)?,
        disk_usage_pct: row.get(3)?,
        active_connections: row.get(4)?,
        response_time_ms: row.get(5)?,
    })
}
