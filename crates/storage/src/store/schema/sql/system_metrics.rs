#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE TABLE IF NOT EXISTS system_metrics (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          ts_ms INTEGER NOT NULL CHECK(ts_ms >= 0),
          cpu_usage_pct REAL NOT NULL,
          mem_usage_pct REAL NOT NULL,
          disk_usage_pct REAL NOT NULL,
          active_connections INTEGER NOT NULL CHECK(active_connections >= 0),
          response_time_ms REAL NOT NULL
        );
"#;
