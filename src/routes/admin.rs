use axum::extract::State;
use axum::routing::post;
use axum::Router;
use http::StatusCode;
use tracing::info;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/refresh", post(refresh))
}

/// POST /api/admin/refresh
///
/// Drops cached datasets so the next request refetches from the source.
async fn refresh(State(state): State<AppState>) -> StatusCode {
    info!("POST /api/admin/refresh - invalidating cached datasets");
    state.cache.invalidate();
    StatusCode::NO_CONTENT
}
