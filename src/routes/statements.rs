use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::FiscalYearSummary;
use crate::routes::pnl::viewer_offset;
use crate::services::statement_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_statements))
}

#[derive(Debug, Deserialize)]
pub struct StatementQuery {
    /// Full amounts instead of K/L/Cr abbreviations.
    #[serde(default)]
    pub full: bool,
    pub tz_offset_minutes: Option<i32>,
}

/// GET /api/statements
///
/// Fiscal-year P&L statements with totals and display-ready amounts.
///
/// Example: GET /api/statements?full=true
async fn get_statements(
    Query(params): Query<StatementQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<FiscalYearSummary>>, AppError> {
    info!("GET /api/statements - full={}", params.full);

    let offset = viewer_offset(&state, params.tz_offset_minutes)?;

    let years = state.cache.statements(state.source.as_ref()).await?;
    let summaries = statement_service::summarize_all(&years, params.full, &offset);

    info!("Returning {} fiscal years", summaries.len());
    Ok(Json(summaries))
}
