#![forbid(unsafe_code)]

use dash_core::InvalidSeriesType;
use dash_storage::StoreError;

#[derive(Debug)]
pub enum DashboardError {
    /// Client asked for a chart series that does not exist.
    InvalidSeriesType(String),
    Cancelled,
    Store(StoreError),
}

impl DashboardError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidSeriesType(_))
    }
}

impl std::fmt::Display for DashboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSeriesType(raw) => write!(f, "unrecognized series type: {raw:?}"),
            Self::Cancelled => write!(f, "operation cancelled"),
            Self::Store(err) => write!(f, "store: {err}"),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::InvalidSeriesType(_) | Self::Cancelled => None,
        }
    }
}

impl From<StoreError> for DashboardError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Cancelled => Self::Cancelled,
            other => Self::Store(other),
        }
    }
}

impl From<InvalidSeriesType> for DashboardError {
    fn from(value: InvalidSeriesType) -> Self {
        Self::InvalidSeriesType(value.0)
    }
}
