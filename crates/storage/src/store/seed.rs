#![forbid(unsafe_code)]

use super::ingest::{
    insert_activities_tx, insert_sales_tx, insert_system_metrics_tx, insert_user_metrics_tx,
};
use super::{SqliteStore, StoreError};
use dash_core::timestamps::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE};
use dash_core::{
    ActivityRecord, ActivityStatus, Money, SalesRecord, SystemMetricRecord, UserMetricRecord,
};
use rand::Rng;
use rand::seq::SliceRandom;

const SEED_SALES: usize = 100;
const SEED_USER_DAYS: i64 = 30;
const SEED_SYSTEM_SAMPLES: i64 = 100;
const SEED_ACTIVITIES: usize = 50;

const CATEGORIES: &[&str] = &["Electronics", "Clothing", "Books", "Home & Garden", "Sports"];
const REGIONS: &[&str] = &["North America", "Europe", "Asia", "South America", "Africa"];
const USERS: &[&str] = &[
    "John Doe",
    "Jane Smith",
    "Mike Johnson",
    "Sarah Wilson",
    "Tom Brown",
];
const ACTIONS: &[&str] = &[
    "Login",
    "Logout",
    "Purchase",
    "View Product",
    "Update Profile",
    "Add to Cart",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub skipped: bool,
    pub sales: usize,
    pub user_metrics: usize,
    pub system_metrics: usize,
    pub activities: usize,
}

impl SqliteStore {
    /// Fills an empty store with a month of demo data anchored at `now_ms`.
    ///
    /// Does nothing when any sales row exists. All four tables are written in
    /// one transaction, so a failure leaves the store empty. All randomness
    /// comes from `rng`, so a seeded generator reproduces the same fixture.
    pub fn seed_demo_data<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        now_ms: i64,
    ) -> Result<SeedReport, StoreError> {
        if self.table_counts()?.sales > 0 {
            return Ok(SeedReport {
                skipped: true,
                ..SeedReport::default()
            });
        }

        let sales = demo_sales(rng, now_ms);
        let user_metrics = demo_user_metrics(rng, now_ms);
        let system_metrics = demo_system_metrics(rng, now_ms);
        let activities = demo_activities(rng, now_ms);

        let tx = self.conn.transaction()?;
        let report = SeedReport {
            skipped: false,
            sales: insert_sales_tx(&tx, &sales)?,
            user_metrics: insert_user_metrics_tx(&tx, &user_metrics)?,
            system_metrics: insert_system_metrics_tx(&tx, &system_metrics)?,
            activities: insert_activities_tx(&tx, &activities)?,
        };
        tx.commit()?;
        Ok(report)
    }
}

fn window_start(now_ms: i64) -> i64 {
    now_ms.saturating_sub(SEED_USER_DAYS * MS_PER_DAY).max(0)
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, values: &[&'a str]) -> &'a str {
    values.choose(rng).copied().unwrap_or_default()
}

fn demo_sales<R: Rng + ?Sized>(rng: &mut R, now_ms: i64) -> Vec<SalesRecord> {
    let start = window_start(now_ms);
    (0..SEED_SALES)
        .map(|_| SalesRecord {
            ts_ms: start + rng.gen_range(0..SEED_USER_DAYS) * MS_PER_DAY,
            revenue: Money::from_cents(rng.gen_range(100_000..1_100_000)),
            order_count: rng.gen_range(1..50),
            category: pick(rng, CATEGORIES).to_string(),
            region: pick(rng, REGIONS).to_string(),
        })
        .collect()
}

fn demo_user_metrics<R: Rng + ?Sized>(rng: &mut R, now_ms: i64) -> Vec<UserMetricRecord> {
    let start = window_start(now_ms);
    (0..SEED_USER_DAYS)
        .map(|day| UserMetricRecord {
            date_ms: start + day * MS_PER_DAY,
            active_users: rng.gen_range(1_000..5_000),
            new_signups: rng.gen_range(50..300),
            page_views: rng.gen_range(10_000..50_000),
            bounce_rate: rng.gen_range(0.2..0.7),
        })
        .collect()
}

fn demo_system_metrics<R: Rng + ?Sized>(rng: &mut R, now_ms: i64) -> Vec<SystemMetricRecord> {
    (0..SEED_SYSTEM_SAMPLES)
        .map(|hour| SystemMetricRecord {
            ts_ms: now_ms.saturating_sub(hour * MS_PER_HOUR).max(0),
            cpu_usage_pct: rng.gen_range(0.0..100.0),
            mem_usage_pct: rng.gen_range(0.0..100.0),
            disk_usage_pct: rng.gen_range(0.0..100.0),
            active_connections: rng.gen_range(100..1_000),
            response_time_ms: rng.gen_range(50.0..550.0),
        })
        .collect()
}

fn demo_activities<R: Rng + ?Sized>(rng: &mut R, now_ms: i64) -> Vec<ActivityRecord> {
    (0..SEED_ACTIVITIES)
        .map(|_| {
            let minutes_ago = rng.gen_range(0..1_440);
            let action = pick(rng, ACTIONS);
            let described = pick(rng, ACTIONS).to_lowercase();
            let status = ActivityStatus::ALL[rng.gen_range(0..ActivityStatus::ALL.len())];
            ActivityRecord {
                ts_ms: now_ms.saturating_sub(minutes_ago * MS_PER_MINUTE).max(0),
                user_name: pick(rng, USERS).to_string(),
                action: action.to_string(),
                description: format!("User performed {described} action"),
                status,
            }
        })
        .collect()
}
