use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::routes::{admin, health, pnl, statements};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    // The dashboard is served from a different origin.
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/pnl", pnl::router())
        .nest("/api/statements", statements::router())
        .nest("/api/admin", admin::router())
        .layer(cors)
        .with_state(state)
}
