#![forbid(unsafe_code)]

use crate::money::Money;
use crate::timestamps::serialize_rfc3339;
use serde::{Serialize, Serializer};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    #[serde(rename = "date", serialize_with = "serialize_rfc3339")]
    pub ts_ms: i64,
    pub revenue: Money,
    #[serde(rename = "orders")]
    pub order_count: i64,
    #[serde(rename = "productCategory")]
    pub category: String,
    pub region: String,
}

impl SalesRecord {
    pub fn validate(&self) -> Result<(), RecordError> {
        check_timestamp(self.ts_ms)?;
        if self.revenue.is_negative() {
            return Err(RecordError::NegativeAmount("revenue"));
        }
        check_count("orders", self.order_count)?;
        check_label("category", &self.category)?;
        check_label("region", &self.region)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMetricRecord {
    #[serde(rename = "date", serialize_with = "serialize_rfc3339")]
    pub date_ms: i64,
    pub active_users: i64,
    pub new_signups: i64,
    pub page_views: i64,
    pub bounce_rate: f64,
}

impl UserMetricRecord {
    pub fn validate(&self) -> Result<(), RecordError> {
        check_timestamp(self.date_ms)?;
        check_count("activeUsers", self.active_users)?;
        check_count("newSignups", self.new_signups)?;
        check_count("pageViews", self.page_views)?;
        if !(0.0..=1.0).contains(&self.bounce_rate) {
            return Err(RecordError::BounceRateOutOfRange);
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMetricRecord {
    #[serde(rename = "timestamp", serialize_with = "serialize_rfc3339")]
    pub ts_ms: i64,
    #[serde(rename = "cpuUsage")]
    pub cpu_usage_pct: f64,
    #[serde(rename = "memoryUsage")]
    pub mem_usage_pct: f64,
    #[serde(rename = "diskUsage")]
    pub disk_usage_pct: f64,
    pub active_connections: i64,
    #[serde(rename = "responseTime")]
    pub response_time_ms: f64,
}

impl SystemMetricRecord {
    pub fn validate(&self) -> Result<(), RecordError> {
        check_timestamp(self.ts_ms)?;
        check_gauge("cpuUsage", self.cpu_usage_pct)?;
        check_gauge("memoryUsage", self.mem_usage_pct)?;
        check_gauge("diskUsage", self.disk_usage_pct)?;
        check_count("activeConnections", self.active_connections)?;
        check_gauge("responseTime", self.response_time_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    #[serde(rename = "timestamp", serialize_with = "serialize_rfc3339")]
    pub ts_ms: i64,
    pub user_name: String,
    pub action: String,
    pub description: String,
    pub status: ActivityStatus,
}

impl ActivityRecord {
    pub fn validate(&self) -> Result<(), RecordError> {
        check_timestamp(self.ts_ms)?;
        check_label("userName", &self.user_name)?;
        check_label("action", &self.action)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActivityStatus {
    Success,
    Failed,
    Pending,
}

impl ActivityStatus {
    pub const ALL: [Self; 3] = [Self::Success, Self::Failed, Self::Pending];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Failed => "Failed",
            Self::Pending => "Pending",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
    }
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ActivityStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordError {
    NegativeTimestamp,
    NegativeAmount(&'static str),
    NegativeCount(&'static str),
    NonFiniteGauge(&'static str),
    BounceRateOutOfRange,
    EmptyLabel(&'static str),
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeTimestamp => write!(f, "timestamp must not precede the unix epoch"),
            Self::NegativeAmount(field) => write!(f, "{field} must not be negative"),
            Self::NegativeCount(field) => write!(f, "{field} must not be negative"),
            Self::NonFiniteGauge(field) => {
                write!(f, "{field} must be a finite, non-negative number")
            }
            Self::BounceRateOutOfRange => write!(f, "bounceRate must be within [0, 1]"),
            Self::EmptyLabel(field) => write!(f, "{field} must not be empty"),
        }
    }
}

impl std::error::Error for RecordError {}

fn check_timestamp(ts_ms: i64) -> Result<(), RecordError> {
    if ts_ms < 0 {
        return Err(RecordError::NegativeTimestamp);
    }
    Ok(())
}

fn check_count(field: &'static str, value: i64) -> Result<(), RecordError> {
    if value < 0 {
        return Err(RecordError::NegativeCount(field));
    }
    Ok(())
}

fn check_gauge(field: &'static str, value: f64) -> Result<(), RecordError> {
    if !value.is_finite() || value < 0.0 {
        return Err(RecordError::NonFiniteGauge(field));
    }
    Ok(())
}

fn check_label(field: &'static str, value: &str) -> Result<(), RecordError> {
    if value.trim().is_empty() {
        return Err(RecordError::EmptyLabel(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale() -> SalesRecord {
        SalesRecord {
            ts_ms: 1_700_000_000_000,
            revenue: Money::from_units(100),
            order_count: 3,
            category: "Books".to_string(),
            region: "Europe".to_string(),
        }
    }

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(ActivityStatus::parse("success"), Some(ActivityStatus::Success));
        assert_eq!(ActivityStatus::parse(" FAILED "), Some(ActivityStatus::Failed));
        assert_eq!(ActivityStatus::parse("Pending"), Some(ActivityStatus::Pending));
        assert_eq!(ActivityStatus::parse("done"), None);
    }

    #[test]
    fn sales_validation_rejects_negative_values() {
        assert!(sale().validate().is_ok());

        let mut bad = sale();
        bad.revenue = Money::from_cents(-1);
        assert_eq!(bad.validate(), Err(RecordError::NegativeAmount("revenue")));

        let mut bad = sale();
        bad.order_count = -2;
        assert_eq!(bad.validate(), Err(RecordError::NegativeCount("orders")));

        let mut bad = sale();
        bad.category = "  ".to_string();
        assert_eq!(bad.validate(), Err(RecordError::EmptyLabel("category")));
    }

    #[test]
    fn bounce_rate_must_be_a_fraction() {
        let mut metric = UserMetricRecord {
            date_ms: 0,
            active_users: 10,
            new_signups: 1,
            page_views: 100,
            bounce_rate: 1.0,
        };
        assert!(metric.validate().is_ok());
        metric.bounce_rate = 1.01;
        assert_eq!(metric.validate(), Err(RecordError::BounceRateOutOfRange));
        metric.bounce_rate = f64::NAN;
        assert_eq!(metric.validate(), Err(RecordError::BounceRateOutOfRange));
    }

    #[test]
    fn sales_record_serializes_with_dashboard_field_names() {
        let value = serde_json::to_value(sale()).unwrap();
        assert_eq!(value["date"], "2023-11-14T22:13:20Z");
        assert_eq!(value["revenue"], "100.00");
        assert_eq!(value["orders"], 3);
        assert_eq!(value["productCategory"], "Books");
    }
}
