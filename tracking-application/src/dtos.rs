use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

use tracking_domain::{Event, EventId, Parameters, StreamId};

/// Body of `POST /events` as sent by the browser script.
///
/// The server-controlled fields are decoded with their proper types, so a
/// malformed value is still rejected, and then thrown away by
/// [`EventSubmission::into_event`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSubmission {
    pub name: String,
    #[serde(default)]
    pub parameters: Option<Parameters>,
    #[serde(default)]
    pub stream_id: Option<StreamId>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub uuid: Option<Uuid>,
    #[serde(default)]
    pub inserted_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl EventSubmission {
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Builds the stored event, replacing every server-controlled field.
    pub fn into_event(self, ip: String, now: OffsetDateTime) -> Event {
        Event {
            id: EventId::generate(),
            name: self.name,
            ip,
            parameters: self.parameters.unwrap_or_default(),
            stream_id: self.stream_id,
            inserted_at: now,
            updated_at: now,
        }
    }
}
