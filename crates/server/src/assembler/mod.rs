#![forbid(unsafe_code)]

//! Read-model assembly over the metrics store.
//!
//! Every call re-reads the store; nothing is cached between calls. The token
//! is checked before each store read, and an attached store connection is
//! interrupted mid-statement when the token fires.

mod error;

#[cfg(test)]
mod tests;

pub use error::DashboardError;

use dash_core::summary::{
    RECENT_SALES_LIMIT, SUMMARY_ACTIVITIES_LIMIT, SYSTEM_METRICS_LIMIT, USER_METRICS_LIMIT,
    conversion_rate, system_window_start,
};
use dash_core::{ActivityRecord, CancelToken, ChartSeries, Clock, DashboardSummary, SeriesType};
use dash_storage::{SortOrder, SqliteStore, StoreError, TableCounts};

pub struct Assembler<'a> {
    store: &'a SqliteStore,
    clock: &'a dyn Clock,
    cancel: &'a CancelToken,
}

impl<'a> Assembler<'a> {
    pub fn new(store: &'a SqliteStore, clock: &'a dyn Clock, cancel: &'a CancelToken) -> Self {
        Self {
            store,
            clock,
            cancel,
        }
    }

    pub fn dashboard_summary(&self) -> Result<DashboardSummary, DashboardError> {
        let now_ms = self.clock.now_ms();
        let since_ms = system_window_start(now_ms);

        let totals = self.read(SqliteStore::sales_totals)?;
        let active_users = self
            .read(SqliteStore::latest_user_metric)?
            .map(|metric| metric.active_users)
            .unwrap_or(0);

        Ok(DashboardSummary {
            total_revenue: totals.revenue,
            total_orders: totals.orders,
            active_users,
            conversion_rate: conversion_rate(totals.revenue, totals.orders),
            recent_sales: self.read(|store| store.recent_sales(RECENT_SALES_LIMIT))?,
            user_metrics: self.read(|store| store.recent_user_metrics(USER_METRICS_LIMIT))?,
            system_metrics: self.read(|store| {
                store.system_metrics_since(
                    since_ms,
                    SortOrder::Descending,
                    Some(SYSTEM_METRICS_LIMIT),
                )
            })?,
            recent_activities: self
                .read(|store| store.recent_activities(SUMMARY_ACTIVITIES_LIMIT))?,
            sales_by_category: self.read(SqliteStore::revenue_by_category)?,
            sales_by_region: self.read(SqliteStore::revenue_by_region)?,
            generated_at_ms: now_ms,
        })
    }

    /// `raw_type` is matched case-insensitively; an unknown type fails before
    /// any store read.
    pub fn chart_series(&self, raw_type: &str) -> Result<ChartSeries, DashboardError> {
        self.series_of(SeriesType::parse(raw_type)?)
    }

    pub fn series_of(&self, series_type: SeriesType) -> Result<ChartSeries, DashboardError> {
        match series_type {
            SeriesType::Sales => Ok(ChartSeries::Sales(self.read(SqliteStore::daily_revenue)?)),
            SeriesType::Users => Ok(ChartSeries::Users(self.read(SqliteStore::user_series)?)),
            SeriesType::System => {
                let since_ms = system_window_start(self.clock.now_ms());
                Ok(ChartSeries::System(
                    self.read(|store| store.system_series_since(since_ms))?,
                ))
            }
        }
    }

    pub fn recent_activities(&self, limit: usize) -> Result<Vec<ActivityRecord>, DashboardError> {
        self.read(|store| store.recent_activities(limit))
    }

    /// Row counts per table; used by the health probe.
    pub fn table_counts(&self) -> Result<TableCounts, DashboardError> {
        self.read(SqliteStore::table_counts)
    }

    fn read<T>(
        &self,
        query: impl FnOnce(&SqliteStore) -> Result<T, StoreError>,
    ) -> Result<T, DashboardError> {
        if self.cancel.is_cancelled() {
            return Err(DashboardError::Cancelled);
        }
        Ok(query(self.store)?)
    }
}
