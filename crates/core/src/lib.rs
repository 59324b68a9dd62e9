#![forbid(unsafe_code)]

pub mod cancel;
pub mod clock;
pub mod model;
pub mod money;
pub mod series;
pub mod summary;
pub mod timestamps;

pub use cancel::CancelToken;
pub use clock::{Clock, FixedClock, SystemClock};
pub use model::{
    ActivityRecord, ActivityStatus, RecordError, SalesRecord, SystemMetricRecord,
    UserMetricRecord,
};
pub use money::{Money, MoneyError};
pub use series::{ChartSeries, InvalidSeriesType, SalesPoint, SeriesType, SystemPoint, UserPoint};
pub use summary::DashboardSummary;
