#![forbid(unsafe_code)]

use crate::assembler::DashboardError;
use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub const INVALID_CHART_TYPE_BODY: &str = "Invalid chart type";

#[derive(Debug)]
pub enum ApiError {
    InvalidChartType,
    Cancelled,
    Store(String),
    Internal(String),
}

impl From<DashboardError> for ApiError {
    fn from(value: DashboardError) -> Self {
        match value {
            DashboardError::InvalidSeriesType(raw) => {
                tracing::debug!(series_type = %raw, "rejected chart request");
                Self::InvalidChartType
            }
            DashboardError::Cancelled => Self::Cancelled,
            DashboardError::Store(err) => Self::Store(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidChartType => (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                INVALID_CHART_TYPE_BODY,
            )
                .into_response(),
            Self::Cancelled => error_body(
                StatusCode::SERVICE_UNAVAILABLE,
                "CANCELLED",
                "request cancelled before completion",
            ),
            Self::Store(message) => {
                tracing::error!(error = %message, "store read failed");
                error_body(StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR", &message)
            }
            Self::Internal(message) => {
                tracing::error!(error = %message, "read job failed");
                error_body(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", &message)
            }
        }
    }
}

fn error_body(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(json!({ "error": { "code": code, "message": message } })),
    )
        .into_response()
}
