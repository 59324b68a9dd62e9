#![forbid(unsafe_code)]

use super::super::{SalesTotals, SqliteStore, StoreError};
use super::sql_limit;
use dash_core::timestamps::MS_PER_DAY;
use dash_core::{Money, SalesPoint, SalesRecord};
use rusqlite::{Row, params};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SalesDimension {
    Category,
    Region,
}

impl SalesDimension {
    fn column(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Region => "region",
        }
    }
}

impl SqliteStore {
    pub fn sales_totals(&self) -> Result<SalesTotals, StoreError> {
        Ok(self.conn.query_row(
            "SELECT COALESCE(SUM(revenue_cents), 0), COALESCE(SUM(order_count), 0) FROM sales",
            [],
            |row| {
                Ok(SalesTotals {
                    revenue: Money::from_cents(row.get(0)?),
                    orders: row.get(1)?,
                })
            },
        )?)
    }

    pub fn recent_sales(&self, limit: usize) -> Result<Vec<SalesRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT ts_ms, revenue_cents, order_count, category, region
            FROM sales
            ORDER BY ts_ms DESC, id DESC
            LIMIT ?1
            "#,
        )?;
        let rows = stmt.query_map(params![sql_limit(Some(limit))], sales_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn revenue_by_category(&self) -> Result<BTreeMap<String, Money>, StoreError> {
        self.revenue_grouped_by(SalesDimension::Category)
    }

    pub fn revenue_by_region(&self) -> Result<BTreeMap<String, Money>, StoreError> {
        self.revenue_grouped_by(SalesDimension::Region)
    }

    /// Revenue summed per UTC calendar day, oldest day first.
    pub fn daily_revenue(&self) -> Result<Vec<SalesPoint>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT ts_ms / ?1 AS day, SUM(revenue_cents)
            FROM sales
            GROUP BY day
            ORDER BY day ASC
            "#,
        )?;
        let rows = stmt.query_map(params![MS_PER_DAY], |row| {
            Ok(SalesPoint {
                day_start_ms: row.get::<_, i64>(0)? * MS_PER_DAY,
                revenue: Money::from_cents(row.get(1)?),
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn revenue_grouped_by(
        &self,
        dimension: SalesDimension,
    ) -> Result<BTreeMap<String, Money>, StoreError> {
        let column = dimension.column();
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {column}, SUM(revenue_cents) FROM sales GROUP BY {column}"
        ))?;
        let mut rows = stmt.query([])?;
        let mut grouped = BTreeMap::new();
        while let Some(row) = rows.next()? {
            grouped.insert(row.get::<_, String>(0)?, Money::from_cents(row.get(1)?));
        }
        Ok(grouped)
    }
}

fn sales_from_row(row: &Row<'_>) -> rusqlite::Result<SalesRecord> {
    Ok(SalesRecord {
        ts_ms: row.get(0)?,
        revenue: Money::from_cents(row.get(1)?),
        order_count: row.get(2)?,
        category: row.get(3)?,
        region: row.get(4)?,
    })
}
