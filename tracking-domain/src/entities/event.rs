// Event entity
// One client-side action (page view, click, ...) as it is stored.

use time::OffsetDateTime;

use crate::value_objects::{EventId, StreamId};

/// Free-form per-event parameters; any JSON value is accepted per key.
pub type Parameters = serde_json::Map<String, serde_json::Value>;

/// A recorded event. `id`, `ip`, `inserted_at` and `updated_at` are always
/// assigned by the server; once written an event is never updated.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub ip: String,
    pub parameters: Parameters,
    pub stream_id: Option<StreamId>,
    pub inserted_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
