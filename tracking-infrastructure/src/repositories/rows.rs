use clickhouse::Row;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use tracking_domain::{Event, Stream};

#[derive(Debug, Clone, Serialize, Row)]
pub struct EventRow {
    #[serde(with = "clickhouse::serde::uuid")]
    pub id: Uuid,
    pub name: String,
    pub ip: String,
    pub parameters: String,
    #[serde(with = "clickhouse::serde::uuid::option")]
    pub stream_id: Option<Uuid>,
    #[serde(with = "clickhouse::serde::time::datetime64::millis")]
    pub inserted_at: OffsetDateTime,
    #[serde(with = "clickhouse::serde::time::datetime64::millis")]
    pub updated_at: OffsetDateTime,
}

impl From<&Event> for EventRow {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.0,
            name: event.name.clone(),
            ip: event.ip.clone(),
            // a Map<String, Value> always serializes
            parameters: serde_json::Value::Object(event.parameters.clone()).to_string(),
            stream_id: event.stream_id.map(|id| id.0),
            inserted_at: event.inserted_at,
            updated_at: event.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Row)]
pub struct StreamRow {
    #[serde(with = "clickhouse::serde::uuid")]
    pub id: Uuid,
    #[serde(with = "clickhouse::serde::time::datetime64::millis")]
    pub inserted_at: OffsetDateTime,
    #[serde(with = "clickhouse::serde::time::datetime64::millis")]
    pub updated_at: OffsetDateTime,
}

impl From<&Stream> for StreamRow {
    fn from(stream: &Stream) -> Self {
        Self {
            id: stream.id.0,
            inserted_at: stream.inserted_at,
            updated_at: stream.updated_at,
        }
    }
}
