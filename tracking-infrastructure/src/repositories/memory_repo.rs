use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use tracking_domain::{Event, EventRepository, Stream};

/// Process-local store for tests and database-less local runs.
#[derive(Default)]
pub struct MemoryEventRepository {
    events: RwLock<Vec<Event>>,
    streams: RwLock<Vec<Stream>>,
}

impl MemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<Event> {
        self.events.read().await.clone()
    }

    pub async fn streams(&self) -> Vec<Stream> {
        self.streams.read().await.clone()
    }
}

#[async_trait]
impl EventRepository for MemoryEventRepository {
    async fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn insert_event(&self, event: &Event) -> Result<()> {
        self.events.write().await.push(event.clone());
        Ok(())
    }

    async fn insert_stream(&self, stream: &Stream) -> Result<()> {
        self.streams.write().await.push(stream.clone());
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
