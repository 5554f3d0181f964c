// Stream entity
// A browsing session; events may reference it through `Event::stream_id`.

use time::OffsetDateTime;

use crate::value_objects::StreamId;

#[derive(Debug, Clone, PartialEq)]
pub struct Stream {
    pub id: StreamId,
    pub inserted_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Stream {
    /// Starts a new, empty session with a fresh identifier.
    pub fn start(now: OffsetDateTime) -> Self {
        Self {
            id: StreamId::generate(),
            inserted_at: now,
            updated_at: now,
        }
    }
}
