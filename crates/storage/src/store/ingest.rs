#![forbid(unsafe_code)]

use super::{SqliteStore, StoreError};
use dash_core::{ActivityRecord, RecordError, SalesRecord, SystemMetricRecord, UserMetricRecord};
use rusqlite::{Transaction, params};

// Each public insert validates its batch and writes it in a single
// transaction, so a bad record leaves the table untouched. The `*_tx`
// variants let callers group several batches into one transaction.
impl SqliteStore {
    pub fn insert_sales(&mut self, records: &[SalesRecord]) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        let inserted = insert_sales_tx(&tx, records)?;
        tx.commit()?;
        Ok(inserted)
    }

    pub fn insert_user_metrics(
        &mut self,
        records: &[UserMetricRecord],
    ) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        let inserted = insert_user_metrics_tx(&tx, records)?;
        tx.commit()?;
        Ok(inserted)
    }

    pub fn insert_system_metrics(
        &mut self,
        records: &[SystemMetricRecord],
    ) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        let inserted = insert_system_metrics_tx(&tx, records)?;
        tx.commit()?;
        Ok(inserted)
    }

    pub fn insert_activities(&mut self, records: &[ActivityRecord]) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        let inserted = insert_activities_tx(&tx, records)?;
        tx.commit()?;
        Ok(inserted)
    }
}

pub(super) fn insert_sales_tx(
    tx: &Transaction<'_>,
    records: &[SalesRecord],
) -> Result<usize, StoreError> {
    validate_batch("sales", records, SalesRecord::validate)?;
    let mut stmt = tx.prepare(
        r#"
        INSERT INTO sales(ts_ms, revenue_cents, order_count, category, region)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )?;
    for record in records {
        stmt.execute(params![
            record.ts_ms,
            record.revenue.cents(),
            record.order_count,
            record.category,
            record.region
        ])?;
    }
    Ok(records.len())
}

pub(super) fn insert_user_metrics_tx(
    tx: &Transaction<'_>,
    records: &[UserMetricRecord],
) -> Result<usize, StoreError> {
    validate_batch("user_metrics", records, UserMetricRecord::validate)?;
    let mut stmt = tx.prepare(
        r#"
        INSERT INTO user_metrics(date_ms, active_users, new_signups, page_views, bounce_rate)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )?;
    for record in records {
        stmt.execute(params![
            record.date_ms,
            record.active_users,
            record.new_signups,
            record.page_views,
            record.bounce_rate
        ])?;
    }
    Ok(records.len())
}

pub(super) fn insert_system_metrics_tx(
    tx: &Transaction<'_>,
    records: &[SystemMetricRecord],
) -> Result<usize, StoreError> {
    validate_batch("system_metrics", records, SystemMetricRecord::validate)?;
    let mut stmt = tx.prepare(
        r#"
        INSERT INTO system_metrics(
          ts_ms, cpu_usage_pct, mem_usage_pct, disk_usage_pct, active_connections, response_time_ms
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )?;
    for record in records {
        stmt.execute(params![
            record.ts_ms,
            record.cpu_usage_pct,
            record.mem_usage_pct,
            record.disk_usage_pct,
            record.active_connections,
            record.response_time_ms
        ])?;
    }
    Ok(records.len())
}

pub(super) fn insert_activities_tx(
    tx: &Transaction<'_>,
    records: &[ActivityRecord],
) -> Result<usize, StoreError> {
    validate_batch("activities", records, ActivityRecord::validate)?;
    let mut stmt = tx.prepare(
        r#"
        INSERT INTO activities(ts_ms, user_name, action, description, status)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )?;
    for record in records {
        stmt.execute(params![
            record.ts_ms,
            record.user_name,
            record.action,
            record.description,
            record.status.as_str()
        ])?;
    }
    Ok(records.len())
}

fn validate_batch<T>(
    table: &'static str,
    records: &[T],
    validate: impl Fn(&T) -> Result<(), RecordError>,
) -> Result<(), StoreError> {
    for (index, record) in records.iter().enumerate() {
        validate(record).map_err(|error| StoreError::InvalidRecord {
            table,
            index,
            error,
        })?;
    }
    Ok(())
}
