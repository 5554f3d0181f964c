use async_trait::async_trait;

use crate::entities::{Event, Stream};

/// Persistence boundary for events and streams. Implementations carry no
/// business rules; uniqueness and required columns are left to the store.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Creates missing tables. Safe to call on every start; never drops or
    /// alters existing data.
    async fn ensure_schema(&self) -> anyhow::Result<()>;
    async fn insert_event(&self, event: &Event) -> anyhow::Result<()>;
    async fn insert_stream(&self, stream: &Stream) -> anyhow::Result<()>;
    async fn ping(&self) -> anyhow::Result<()>;
}
