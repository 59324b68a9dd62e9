#![forbid(unsafe_code)]

use crate::money::Money;
use crate::timestamps::{serialize_date, serialize_rfc3339};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SeriesType {
    Sales,
    Users,
    System,
}

impl SeriesType {
    pub const ALL: [Self; 3] = [Self::Sales, Self::Users, Self::System];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Users => "users",
            Self::System => "system",
        }
    }

    pub fn parse(value: &str) -> Result<Self, InvalidSeriesType> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| InvalidSeriesType(value.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidSeriesType(pub String);

impl std::fmt::Display for InvalidSeriesType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unrecognized series type: {:?}", self.0)
    }
}

impl std::error::Error for InvalidSeriesType {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SalesPoint {
    #[serde(rename = "date", serialize_with = "serialize_date")]
    pub day_start_ms: i64,
    pub revenue: Money,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPoint {
    #[serde(rename = "date", serialize_with = "serialize_rfc3339")]
    pub date_ms: i64,
    pub active_users: i64,
    pub new_signups: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SystemPoint {
    #[serde(rename = "timestamp", serialize_with = "serialize_rfc3339")]
    pub ts_ms: i64,
    #[serde(rename = "cpuUsage")]
    pub cpu_usage_pct: f64,
    #[serde(rename = "memoryUsage")]
    pub mem_usage_pct: f64,
}

/// One computed chart series; serializes as a bare JSON array.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartSeries {
    Sales(Vec<SalesPoint>),
    Users(Vec<UserPoint>),
    System(Vec<SystemPoint>),
}
