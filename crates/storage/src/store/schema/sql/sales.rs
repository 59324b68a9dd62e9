#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE TABLE IF NOT EXISTS sales (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          ts_ms INTEGER NOT NULL CHECK(ts_ms >= 0),
          revenue_cents INTEGER NOT NULL CHECK(revenue_cents >= 0),
          order_count INTEGER NOT NULL CHECK(order_count >= 0),
          category TEXT NOT NULL,
          region TEXT NOT NULL
        );
"#;
