use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub fn router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.web_dir);

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/daily", get(handlers::get_daily))
        .nest_service("/static", assets)
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
