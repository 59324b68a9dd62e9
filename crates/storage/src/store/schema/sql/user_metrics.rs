#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE TABLE IF NOT EXISTS user_metrics (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          date_ms INTEGER NOT NULL CHECK(date_ms >= 0),
          active_users INTEGER NOT NULL CHECK(active_users >= 0),
          new_signups INTEGER NOT NULL CHECK(new_signups >= 0),
          page_views INTEGER NOT NULL CHECK(page_views >= 0),
          bounce_rate REAL NOT NULL CHECK(bounce_rate >= 0.0 AND bounce_rate <= 1.0)
        );
"#;
