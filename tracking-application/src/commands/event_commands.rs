use time::OffsetDateTime;
use tracing::error;

use tracking_domain::EventId;

use crate::dtos::EventSubmission;
use crate::{AppError, AppState};

/// Stamps the submission with server-assigned fields and writes it once.
pub async fn record_event(
    state: &AppState,
    submission: EventSubmission,
    client_ip: String,
) -> Result<EventId, AppError> {
    let event = submission.into_event(client_ip, OffsetDateTime::now_utc());

    if let Err(err) = state.event_repo.insert_event(&event).await {
        error!(event = ?event, error = %err, "error writing event");
        state.metrics.record_event_error();
        return Err(AppError::Storage(err));
    }

    state.metrics.record_event();
    Ok(event.id)
}
