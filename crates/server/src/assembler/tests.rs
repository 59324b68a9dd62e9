use super::*;
use dash_core::timestamps::{MS_PER_DAY, MS_PER_HOUR};
use dash_core::{
    ActivityStatus, FixedClock, Money, SalesRecord, SystemMetricRecord, UserMetricRecord,
};

const D1: i64 = 20_000 * MS_PER_DAY;
const D2: i64 = D1 + MS_PER_DAY;
const NOW: i64 = D2 + 12 * MS_PER_HOUR;

fn sale(ts_ms: i64, units: i64, orders: i64, category: &str, region: &str) -> SalesRecord {
    SalesRecord {
        ts_ms,
        revenue: Money::from_units(units),
        order_count: orders,
        category: category.to_string(),
        region: region.to_string(),
    }
}

fn system_metric(ts_ms: i64, cpu: f64) -> SystemMetricRecord {
    SystemMetricRecord {
        ts_ms,
        cpu_usage_pct: cpu,
        mem_usage_pct: cpu / 2.0,
        disk_usage_pct: 10.0,
        active_connections: 5,
        response_time_ms: 80.0,
    }
}

fn activity(ts_ms: i64, user: &str) -> ActivityRecord {
    ActivityRecord {
        ts_ms,
        user_name: user.to_string(),
        action: "Purchase".to_string(),
        description: "User performed purchase action".to_string(),
        status: ActivityStatus::Pending,
    }
}

fn scenario_store() -> SqliteStore {
    let mut store = SqliteStore::open_in_memory().expect("open store");
    store
        .insert_sales(&[
            sale(D1, 100, 3, "Books", "Europe"),
            sale(D2, 50, 1, "Books", "Asia"),
            sale(D1 + 2 * MS_PER_HOUR, 200, 3, "Electronics", "Europe"),
        ])
        .expect("insert sales");
    store
        .insert_user_metrics(&[
            UserMetricRecord {
                date_ms: D1,
                active_users: 1_500,
                new_signups: 40,
                page_views: 12_000,
                bounce_rate: 0.3,
            },
            UserMetricRecord {
                date_ms: D2,
                active_users: 2_750,
                new_signups: 65,
                page_views: 18_000,
                bounce_rate: 0.25,
            },
        ])
        .expect("insert user metrics");
    store
        .insert_system_metrics(&[
            system_metric(NOW - 30 * MS_PER_HOUR, 99.0),
            system_metric(NOW - 2 * MS_PER_HOUR, 40.0),
            system_metric(NOW - MS_PER_HOUR, 60.0),
        ])
        .expect("insert system metrics");
    store
}

#[test]
fn summary_matches_documented_scenario() {
    let store = scenario_store();
    let clock = FixedClock(NOW);
    let cancel = CancelToken::new();
    let summary = Assembler::new(&store, &clock, &cancel)
        .dashboard_summary()
        .expect("summary");

    assert_eq!(summary.total_revenue, Money::from_units(350));
    assert_eq!(summary.total_orders, 7);
    assert_eq!(summary.active_users, 2_750);
    assert!((summary.conversion_rate - 5.0).abs() < 1e-9);
    assert_eq!(summary.sales_by_category.len(), 2);
    assert_eq!(summary.sales_by_category["Books"], Money::from_units(150));
    assert_eq!(summary.sales_by_category["Electronics"], Money::from_units(200));
    assert_eq!(
        summary.sales_by_region.values().sum::<Money>(),
        summary.total_revenue
    );
    assert_eq!(summary.recent_sales.len(), 3);
    assert_eq!(summary.recent_sales[0].ts_ms, D2);
    assert_eq!(summary.user_metrics[0].date_ms, D2);
    assert_eq!(summary.generated_at_ms, NOW);
}

#[test]
fn summary_excludes_stale_system_samples() {
    let store = scenario_store();
    let clock = FixedClock(NOW);
    let cancel = CancelToken::new();
    let summary = Assembler::new(&store, &clock, &cancel)
        .dashboard_summary()
        .expect("summary");

    assert_eq!(
        summary
            .system_metrics
            .iter()
            .map(|m| m.cpu_usage_pct)
            .collect::<Vec<_>>(),
        vec![60.0, 40.0]
    );
}

#[test]
fn summary_of_empty_store_is_all_defaults() {
    let store = SqliteStore::open_in_memory().expect("open store");
    let clock = FixedClock(NOW);
    let cancel = CancelToken::new();
    let summary = Assembler::new(&store, &clock, &cancel)
        .dashboard_summary()
        .expect("summary");

    assert_eq!(summary.total_revenue, Money::ZERO);
    assert_eq!(summary.total_orders, 0);
    assert_eq!(summary.active_users, 0);
    assert_eq!(summary.conversion_rate, 0.0);
    assert!(summary.recent_sales.is_empty());
    assert!(summary.sales_by_category.is_empty());
    assert!(summary.sales_by_region.is_empty());
}

#[test]
fn conversion_rate_is_zero_when_orders_are_zero() {
    let mut store = SqliteStore::open_in_memory().expect("open store");
    store
        .insert_sales(&[sale(D1, 900, 0, "Books", "Europe")])
        .expect("insert sales");
    let clock = FixedClock(NOW);
    let cancel = CancelToken::new();
    let summary = Assembler::new(&store, &clock, &cancel)
        .dashboard_summary()
        .expect("summary");

    assert_eq!(summary.total_revenue, Money::from_units(900));
    assert_eq!(summary.conversion_rate, 0.0);
}

#[test]
fn summary_caps_system_samples_at_twenty_four() {
    let mut store = SqliteStore::open_in_memory().expect("open store");
    let samples = (0..40)
        .map(|i| system_metric(NOW - i * 30 * 60_000, i as f64))
        .collect::<Vec<_>>();
    store.insert_system_metrics(&samples).expect("insert");
    let clock = FixedClock(NOW);
    let cancel = CancelToken::new();
    let summary = Assembler::new(&store, &clock, &cancel)
        .dashboard_summary()
        .expect("summary");

    assert_eq!(summary.system_metrics.len(), 24);
    assert_eq!(summary.system_metrics[0].ts_ms, NOW);
}

#[test]
fn chart_series_type_is_case_insensitive() {
    let store = scenario_store();
    let clock = FixedClock(NOW);
    let cancel = CancelToken::new();
    let assembler = Assembler::new(&store, &clock, &cancel);

    let upper = assembler.chart_series("SALES").expect("upper");
    let lower = assembler.chart_series("sales").expect("lower");
    assert_eq!(upper, lower);

    let ChartSeries::Sales(points) = lower else {
        panic!("expected sales series");
    };
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].day_start_ms, D1);
    assert_eq!(points[0].revenue, Money::from_units(300));
    assert_eq!(points[1].day_start_ms, D2);
    assert_eq!(points[1].revenue, Money::from_units(50));
}

#[test]
fn users_series_is_oldest_first() {
    let store = scenario_store();
    let clock = FixedClock(NOW);
    let cancel = CancelToken::new();
    let series = Assembler::new(&store, &clock, &cancel)
        .chart_series("users")
        .expect("users");

    let ChartSeries::Users(points) = series else {
        panic!("expected users series");
    };
    assert_eq!(
        points
            .iter()
            .map(|p| (p.date_ms, p.active_users, p.new_signups))
            .collect::<Vec<_>>(),
        vec![(D1, 1_500, 40), (D2, 2_750, 65)]
    );
}

#[test]
fn system_series_uses_the_last_day_only() {
    let store = scenario_store();
    let clock = FixedClock(NOW);
    let cancel = CancelToken::new();
    let series = Assembler::new(&store, &clock, &cancel)
        .chart_series("System")
        .expect("system");

    let ChartSeries::System(points) = series else {
        panic!("expected system series");
    };
    assert_eq!(
        points.iter().map(|p| p.cpu_usage_pct).collect::<Vec<_>>(),
        vec![40.0, 60.0]
    );
}

#[test]
fn unknown_series_type_fails_without_data() {
    let store = scenario_store();
    let clock = FixedClock(NOW);
    let cancel = CancelToken::new();
    let err = Assembler::new(&store, &clock, &cancel)
        .chart_series("unknown")
        .expect_err("should fail");

    assert!(matches!(err, DashboardError::InvalidSeriesType(ref raw) if raw == "unknown"));
    assert!(err.is_client_error());
}

#[test]
fn recent_activities_returns_all_when_fewer_than_limit() {
    let mut store = SqliteStore::open_in_memory().expect("open store");
    let activities = (0..15)
        .map(|i| activity(NOW - (15 - i) * 60_000, &format!("user-{i}")))
        .collect::<Vec<_>>();
    store.insert_activities(&activities).expect("insert");
    let clock = FixedClock(NOW);
    let cancel = CancelToken::new();

    let recent = Assembler::new(&store, &clock, &cancel)
        .recent_activities(20)
        .expect("activities");
    assert_eq!(recent.len(), 15);
    assert_eq!(recent[0].user_name, "user-14");
    assert!(recent.windows(2).all(|pair| pair[0].ts_ms > pair[1].ts_ms));
}

#[test]
fn cancelled_token_aborts_every_operation() {
    let store = scenario_store();
    let clock = FixedClock(NOW);
    let cancel = CancelToken::new();
    store.attach_cancel(&cancel);
    cancel.cancel();
    let assembler = Assembler::new(&store, &clock, &cancel);

    assert!(matches!(
        assembler.dashboard_summary(),
        Err(DashboardError::Cancelled)
    ));
    assert!(matches!(
        assembler.chart_series("sales"),
        Err(DashboardError::Cancelled)
    ));
    assert!(matches!(
        assembler.recent_activities(20),
        Err(DashboardError::Cancelled)
    ));
}
