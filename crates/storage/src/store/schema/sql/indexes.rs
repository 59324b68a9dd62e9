#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE INDEX IF NOT EXISTS idx_sales_ts ON sales(ts_ms);
        CREATE INDEX IF NOT EXISTS idx_sales_category ON sales(category);
        CREATE INDEX IF NOT EXISTS idx_sales_region ON sales(region);
        CREATE INDEX IF NOT EXISTS idx_user_metrics_date ON user_metrics(date_ms);
        CREATE INDEX IF NOT EXISTS idx_system_metrics_ts ON system_metrics(ts_ms);
        CREATE INDEX IF NOT EXISTS idx_activities_ts ON activities(ts_ms);
"#;
