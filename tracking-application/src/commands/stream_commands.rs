use time::OffsetDateTime;
use tracing::error;

use tracking_domain::{Stream, StreamId};

use crate::{AppError, AppState};

/// Opens a new session. The stream row exists before any event refers to it.
pub async fn initiate_stream(state: &AppState) -> Result<StreamId, AppError> {
    let stream = Stream::start(OffsetDateTime::now_utc());

    if let Err(err) = state.event_repo.insert_stream(&stream).await {
        error!(stream = ?stream, error = %err, "error making new stream");
        state.metrics.record_stream_error();
        return Err(AppError::Storage(err));
    }

    state.metrics.record_stream();
    Ok(stream.id)
}
