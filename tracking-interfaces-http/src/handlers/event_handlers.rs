use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use axum::Json;
use serde_json::{json, Value};
use tracing::warn;

use tracking_application::commands::{event_commands, stream_commands};
use tracking_application::dtos::EventSubmission;
use tracking_application::AppState;

use crate::error::HttpError;
use crate::middleware::resolve_client_ip;

pub async fn record_event(
    State(state): State<AppState>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, HttpError> {
    if body.is_empty() {
        return Err(HttpError::BadRequest("need event data".to_string()));
    }

    let submission = EventSubmission::from_slice(&body).map_err(|err| {
        warn!("failed to decode event body: {}", err);
        HttpError::BadRequest(err.to_string())
    })?;
    let client_ip = resolve_client_ip(&headers, remote);

    event_commands::record_event(&state, submission, client_ip).await?;
    Ok(Json(json!({ "status": "ok" })))
}

pub async fn initiate_stream(State(state): State<AppState>) -> Result<String, HttpError> {
    let stream_id = stream_commands::initiate_stream(&state).await?;
    Ok(stream_id.to_string())
}
