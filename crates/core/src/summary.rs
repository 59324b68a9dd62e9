#![forbid(unsafe_code)]

use crate::model::{ActivityRecord, SalesRecord, SystemMetricRecord, UserMetricRecord};
use crate::money::Money;
use crate::timestamps::{MS_PER_HOUR, serialize_rfc3339};
use serde::Serialize;
use std::collections::BTreeMap;

pub const RECENT_SALES_LIMIT: usize = 10;
pub const USER_METRICS_LIMIT: usize = 7;
pub const SYSTEM_METRICS_LIMIT: usize = 24;
pub const SUMMARY_ACTIVITIES_LIMIT: usize = 10;
pub const DEFAULT_ACTIVITIES_LIMIT: usize = 20;
pub const MAX_ACTIVITIES_LIMIT: usize = 100;

pub const SYSTEM_WINDOW_MS: i64 = 24 * MS_PER_HOUR;

/// Earliest sample timestamp (inclusive) inside the system-metrics window.
pub fn system_window_start(now_ms: i64) -> i64 {
    now_ms.saturating_sub(SYSTEM_WINDOW_MS)
}

/// Average order value scaled by 0.1. Kept for dashboard compatibility; it is
/// not a true conversion rate.
pub fn conversion_rate(total_revenue: Money, total_orders: i64) -> f64 {
    if total_orders > 0 {
        total_revenue.to_f64() / total_orders as f64 * 0.1
    } else {
        0.0
    }
}

/// Read-model behind the dashboard page.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_revenue: Money,
    pub total_orders: i64,
    pub active_users: i64,
    pub conversion_rate: f64,
    pub recent_sales: Vec<SalesRecord>,
    pub user_metrics: Vec<UserMetricRecord>,
    pub system_metrics: Vec<SystemMetricRecord>,
    pub recent_activities: Vec<ActivityRecord>,
    pub sales_by_category: BTreeMap<String, Money>,
    pub sales_by_region: BTreeMap<String, Money>,
    #[serde(rename = "generatedAt", serialize_with = "serialize_rfc3339")]
    pub generated_at_ms: i64,
}
