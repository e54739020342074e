use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;
use tracing::info;

use crate::config::tz_offset;
use crate::errors::AppError;
use crate::models::{
    BarSeries, Bucket, CalendarHeatmap, CalendarMode, ChartWindow, DailyRecord, Granularity,
    LineChart,
};
use crate::services::{aggregation_service, calendar_service, chart_axis, pagination};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/records", get(get_records))
        .route("/series", get(get_series))
        .route("/buckets", get(get_buckets))
        .route("/growth", get(get_growth_chart))
        .route("/daily", get(get_daily_chart))
        .route("/calendar", get(get_calendar))
        .route("/years", get(get_years))
}

#[derive(Debug, Deserialize)]
pub struct SeriesQuery {
    pub granularity: Option<String>,
    /// Omit to land on the most recent page.
    pub page: Option<i64>,
    pub page_size: Option<usize>,
    pub tz_offset_minutes: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct BucketQuery {
    pub granularity: Option<String>,
    pub tz_offset_minutes: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    pub window: Option<String>,
    pub tz_offset_minutes: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub mode: Option<String>,
    pub tz_offset_minutes: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct OffsetQuery {
    pub tz_offset_minutes: Option<i32>,
}

/// The viewer's offset if they sent one, else the configured default.
pub(crate) fn viewer_offset(
    state: &AppState,
    minutes: Option<i32>,
) -> Result<FixedOffset, AppError> {
    match minutes {
        Some(m) => tz_offset(m).ok_or_else(|| {
            AppError::Validation(format!("tz_offset_minutes {} is outside -1439..=1439", m))
        }),
        None => Ok(state.default_offset),
    }
}

fn viewer_now(offset: &FixedOffset) -> DateTime<FixedOffset> {
    Utc::now().with_timezone(offset)
}

async fn load_records(state: &AppState) -> Result<Arc<Vec<DailyRecord>>, AppError> {
    state.cache.records(state.source.as_ref()).await
}

/// GET /api/pnl/records
async fn get_records(State(state): State<AppState>) -> Result<Json<Vec<DailyRecord>>, AppError> {
    info!("GET /api/pnl/records");
    let records = load_records(&state).await?;
    Ok(Json(records.as_ref().clone()))
}

/// GET /api/pnl/series
///
/// Bar chart data: records aggregated to `granularity` and cut into pages.
///
/// Example: GET /api/pnl/series?granularity=weekly&page=0
async fn get_series(
    Query(params): Query<SeriesQuery>,
    State(state): State<AppState>,
) -> Result<Json<BarSeries>, AppError> {
    let granularity = params
        .granularity
        .as_deref()
        .map(Granularity::parse_lenient)
        .unwrap_or_default();
    let page_size = params.page_size.unwrap_or(state.page_size);
    if page_size == 0 {
        return Err(AppError::Validation("page_size must be at least 1".to_string()));
    }
    let offset = viewer_offset(&state, params.tz_offset_minutes)?;

    info!(
        "GET /api/pnl/series - granularity={}, page={:?}, page_size={}",
        granularity.as_str(),
        params.page,
        page_size
    );

    let records = load_records(&state).await?;
    let aggregated = aggregation_service::aggregate(&records, granularity, &offset);
    let page = pagination::paginate(&aggregated, page_size, params.page);

    Ok(Json(chart_axis::bar_series(granularity, page)))
}

/// GET /api/pnl/buckets
async fn get_buckets(
    Query(params): Query<BucketQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Bucket>>, AppError> {
    let granularity = params
        .granularity
        .as_deref()
        .map(Granularity::parse_lenient)
        .unwrap_or_default();
    let offset = viewer_offset(&state, params.tz_offset_minutes)?;
    info!("GET /api/pnl/buckets - granularity={}", granularity.as_str());

    let records = load_records(&state).await?;
    Ok(Json(aggregation_service::aggregate_buckets(&records, granularity, &offset)))
}

fn parse_window(raw: Option<&str>) -> Result<ChartWindow, AppError> {
    raw.map(ChartWindow::parse)
        .transpose()
        .map_err(AppError::Validation)
        .map(Option::unwrap_or_default)
}

/// GET /api/pnl/growth
///
/// Cumulative P&L line over `window` (year, month or all).
async fn get_growth_chart(
    Query(params): Query<ChartQuery>,
    State(state): State<AppState>,
) -> Result<Json<LineChart>, AppError> {
    let window = parse_window(params.window.as_deref())?;
    let offset = viewer_offset(&state, params.tz_offset_minutes)?;
    info!("GET /api/pnl/growth - window={:?}", window);

    let records = load_records(&state).await?;
    Ok(Json(chart_axis::growth_chart(&records, window, viewer_now(&offset))))
}

/// GET /api/pnl/daily
async fn get_daily_chart(
    Query(params): Query<ChartQuery>,
    State(state): State<AppState>,
) -> Result<Json<LineChart>, AppError> {
    let window = parse_window(params.window.as_deref())?;
    let offset = viewer_offset(&state, params.tz_offset_minutes)?;
    info!("GET /api/pnl/daily - window={:?}", window);

    let records = load_records(&state).await?;
    Ok(Json(chart_axis::daily_chart(&records, window, viewer_now(&offset))))
}

/// GET /api/pnl/calendar
///
/// Heatmap for a calendar year or the trailing 365 days (the default).
///
/// Example: GET /api/pnl/calendar?mode=2024
async fn get_calendar(
    Query(params): Query<CalendarQuery>,
    State(state): State<AppState>,
) -> Result<Json<CalendarHeatmap>, AppError> {
    let mode = match params.mode.as_deref() {
        Some(raw) => CalendarMode::parse(raw)?,
        None => CalendarMode::Trailing365,
    };
    let offset = viewer_offset(&state, params.tz_offset_minutes)?;
    info!("GET /api/pnl/calendar - mode={}", mode);

    let records = load_records(&state).await?;
    let today = viewer_now(&offset).date_naive();
    Ok(Json(calendar_service::build_heatmap(&records, mode, today, &offset)))
}

/// GET /api/pnl/years
async fn get_years(
    Query(params): Query<OffsetQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<i32>>, AppError> {
    let offset = viewer_offset(&state, params.tz_offset_minutes)?;
    info!("GET /api/pnl/years");

    let records = load_records(&state).await?;
    Ok(Json(calendar_service::distinct_years(&records, &offset)))
}
