use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;

use tracking_application::AppState;

use crate::handlers::{event_handlers, ops_handlers};

/// Static route table. Anything else falls through to axum's 404, and a
/// wrong method on a known path gets 405.
pub fn build_router(state: AppState) -> Router {
    let scripts = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/events", post(event_handlers::record_event))
        .route("/events/initiate", post(event_handlers::initiate_stream))
        .nest_service("/js", scripts)
        .route("/ops/health/live", get(ops_handlers::health_live))
        .route("/ops/health/ready", get(ops_handlers::health_ready))
        .route(
            "/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
