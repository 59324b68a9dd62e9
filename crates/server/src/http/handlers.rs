#![forbid(unsafe_code)]

use super::reader::run_read;
use super::{ApiError, AppState};
use crate::assembler::DashboardError;
use crate::build_fingerprint_static;
use crate::view::render_summary_page;
use axum::Json;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Response};
use dash_core::summary::{DEFAULT_ACTIVITIES_LIMIT, MAX_ACTIVITIES_LIMIT};
use dash_core::{ActivityRecord, ChartSeries, SeriesType};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Default, Deserialize)]
pub(super) struct SummaryQuery {
    format: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ChartQuery {
    #[serde(rename = "type")]
    series_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ActivitiesQuery {
    limit: Option<usize>,
}

pub(super) async fn summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Response, ApiError> {
    let summary = run_read(&state, |assembler| assembler.dashboard_summary()).await?;
    let wants_json = query
        .format
        .as_deref()
        .is_some_and(|format| format.eq_ignore_ascii_case("json"));
    if wants_json {
        Ok(Json(summary).into_response())
    } else {
        Ok(Html(render_summary_page(&summary)).into_response())
    }
}

pub(super) async fn chart(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<ChartSeries>, ApiError> {
    // Parsed before any connection is opened: a bad type never touches the store.
    let raw = query.series_type.unwrap_or_default();
    let series_type = SeriesType::parse(&raw).map_err(DashboardError::from)?;
    let series = run_read(&state, move |assembler| assembler.series_of(series_type)).await?;
    Ok(Json(series))
}

pub(super) async fn activities(
    State(state): State<AppState>,
    Query(query): Query<ActivitiesQuery>,
) -> Result<Json<Vec<ActivityRecord>>, ApiError> {
    let limit = activities_limit(query.limit);
    let activities = run_read(&state, move |assembler| assembler.recent_activities(limit)).await?;
    Ok(Json(activities))
}

pub(super) async fn healthz(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let counts = run_read(&state, |assembler| assembler.table_counts()).await?;
    Ok(Json(json!({
        "status": "ok",
        "build": build_fingerprint_static(),
        "tables": {
            "sales": counts.sales,
            "userMetrics": counts.user_metrics,
            "systemMetrics": counts.system_metrics,
            "activities": counts.activities,
        },
    })))
}

fn activities_limit(requested: Option<usize>) -> usize {
    requested
        .unwrap_or(DEFAULT_ACTIVITIES_LIMIT)
        .clamp(1, MAX_ACTIVITIES_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_core::FixedClock;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;

    fn uninitialized_state(test_name: &str) -> (AppState, PathBuf) {
        let nonce = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "dash_handlers_{test_name}_{}_{nonce}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let state = AppState::new(dir.clone(), Arc::new(FixedClock(0)), Duration::from_secs(5));
        (state, dir)
    }

    fn chart_query(raw: Option<&str>) -> Query<ChartQuery> {
        Query(ChartQuery {
            series_type: raw.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn unknown_chart_type_is_rejected_without_opening_the_store() {
        // No database exists in this dir, so any store access would fail
        // with a store error instead of the client error.
        let (state, dir) = uninitialized_state("chart_invalid");

        for raw in [Some("bogus"), None] {
            let result = chart(State(state.clone()), chart_query(raw)).await;
            assert!(
                matches!(result, Err(ApiError::InvalidChartType)),
                "{raw:?}: {result:?}"
            );
        }

        let result = chart(State(state), chart_query(Some("sales"))).await;
        assert!(matches!(result, Err(ApiError::Store(_))), "{result:?}");

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn activities_limit_defaults_and_clamps() {
        assert_eq!(activities_limit(None), DEFAULT_ACTIVITIES_LIMIT);
        assert_eq!(activities_limit(Some(0)), 1);
        assert_eq!(activities_limit(Some(5)), 5);
        assert_eq!(activities_limit(Some(10_000)), MAX_ACTIVITIES_LIMIT);
    }
}
