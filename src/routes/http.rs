// JSON handlers over the dashboard transformations

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::Value;

use super::AppState;
use crate::age::format_age;
use crate::capacity::{parse_capacity, sort_capacity};
use crate::error::ApiError;
use crate::metrics::{ChartPoint, MetricsTimeSpan, VolumeMetric, volume_chart};
use crate::series::{PromRangeResponse, Sample, densify, tick_count};
use crate::sort_url::{DEFAULT_SORT_FIELD, sort_search};
use crate::version::BUILD_INFO;

/// GET /version — service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(BUILD_INFO)
}

#[derive(Debug, Deserialize)]
pub(super) struct CapacitySortQuery {
    field: Option<String>,
    direction: Option<String>,
}

/// POST /api/capacity/sort — body is a JSON array of records; returns them sorted.
pub(super) async fn sort_capacity_handler(
    State(state): State<AppState>,
    Query(query): Query<CapacitySortQuery>,
    Json(records): Json<Vec<Value>>,
) -> Json<Vec<Value>> {
    let field = query
        .field
        .as_deref()
        .unwrap_or(&state.config.dashboard.capacity_field);
    tracing::debug!(
        operation = "sort_capacity",
        field,
        direction = query.direction.as_deref(),
        records_count = records.len(),
        "Sorting records by capacity"
    );
    Json(sort_capacity(&records, Some(field), query.direction.as_deref()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DensifyRequest {
    #[serde(default)]
    samples: Vec<Sample>,
    starting_timestamp: Option<i64>,
    #[serde(default)]
    sample_duration: i64,
    sample_frequency: Option<i64>,
}

/// POST /api/series/densify — fills gaps in a sample series with nulls.
/// Windows longer than `dashboard.max_densify_ticks` are rejected.
pub(super) async fn densify_handler(
    State(state): State<AppState>,
    Json(req): Json<DensifyRequest>,
) -> Result<Json<Vec<Sample>>, ApiError> {
    if let (Some(start), Some(frequency)) = (req.starting_timestamp, req.sample_frequency) {
        let ticks = tick_count(start, req.sample_duration, frequency);
        let max = state.config.dashboard.max_densify_ticks;
        if ticks > max {
            return Err(ApiError::WindowTooLarge { ticks, max });
        }
    }
    let dense = densify(
        &req.samples,
        req.starting_timestamp,
        req.sample_duration,
        req.sample_frequency,
    );
    tracing::debug!(
        operation = "densify",
        samples_in = req.samples.len(),
        samples_out = dense.len(),
        "Series densified"
    );
    Ok(Json(dense))
}

#[derive(Debug, Deserialize)]
pub(super) struct VolumeMetricsQuery {
    metric: String,
    span: Option<String>,
    start: Option<i64>,
    /// Volume capacity string, e.g. "10Gi"; only the usage graph needs it.
    capacity: Option<String>,
}

/// POST /api/volumes/metrics — body is a Prometheus range response; returns chart points.
pub(super) async fn volume_metrics_handler(
    State(state): State<AppState>,
    Query(query): Query<VolumeMetricsQuery>,
    Json(raw): Json<PromRangeResponse>,
) -> Result<Json<Vec<ChartPoint>>, ApiError> {
    let metric = VolumeMetric::from_name(&query.metric)
        .ok_or_else(|| ApiError::UnknownMetric(query.metric.clone()))?;
    let span = match query.span.as_deref() {
        Some(label) => MetricsTimeSpan::from_label(label)
            .ok_or_else(|| ApiError::UnknownTimeSpan(label.to_string()))?,
        None => state.config.dashboard.default_time_span,
    };
    let capacity = query
        .capacity
        .as_deref()
        .and_then(parse_capacity)
        .map(|c| c.bytes() as f64);

    let points = volume_chart(metric, &raw.data, span, query.start, capacity);
    tracing::debug!(
        operation = "volume_chart",
        metric = ?metric,
        span = span.label(),
        points = points.len(),
        "Volume chart built"
    );
    Ok(Json(points))
}

#[derive(Debug, Deserialize)]
pub(super) struct AgeQuery {
    ms: i64,
}

/// GET /api/age?ms= — `{"age": "1h1s"}`, or `{"age": null}` below one second.
pub(super) async fn age_handler(Query(query): Query<AgeQuery>) -> impl IntoResponse {
    Json(serde_json::json!({ "age": format_age(query.ms) }))
}

#[derive(Debug, Deserialize)]
pub(super) struct SortSearchQuery {
    field: Option<String>,
    #[serde(default)]
    desc: bool,
}

/// GET /api/sort-search — query string a table should carry for this sort state.
pub(super) async fn sort_search_handler(Query(query): Query<SortSearchQuery>) -> impl IntoResponse {
    let field = query.field.as_deref().unwrap_or(DEFAULT_SORT_FIELD);
    Json(serde_json::json!({ "search": sort_search(field, query.desc) }))
}
