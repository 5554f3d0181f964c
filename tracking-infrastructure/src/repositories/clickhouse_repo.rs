use anyhow::Result;
use async_trait::async_trait;
use clickhouse::Client;

use tracking_domain::{DbConfig, Event, EventRepository, Stream};

use crate::repositories::rows::{EventRow, StreamRow};

const CREATE_STREAMS: &str = r#"
CREATE TABLE IF NOT EXISTS streams (
    id UUID,
    inserted_at DateTime64(3),
    updated_at DateTime64(3)
) ENGINE = MergeTree
ORDER BY (inserted_at, id)
"#;

const CREATE_EVENTS: &str = r#"
CREATE TABLE IF NOT EXISTS events (
    id UUID,
    name String,
    ip String,
    parameters String,
    stream_id Nullable(UUID),
    inserted_at DateTime64(3),
    updated_at DateTime64(3)
) ENGINE = MergeTree
PARTITION BY toYYYYMM(inserted_at)
ORDER BY (inserted_at, id)
"#;

/// Statements run by `ensure_schema`, in order. Creation only; nothing here
/// may drop, alter or expire existing rows.
pub fn schema_statements(database: &str) -> Vec<String> {
    vec![
        format!("CREATE DATABASE IF NOT EXISTS {}", quote_identifier(database)),
        CREATE_STREAMS.to_string(),
        CREATE_EVENTS.to_string(),
    ]
}

/// Backtick-quoted identifier; names like `my-db` are not valid bare.
fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('\\', "\\\\").replace('`', "\\`"))
}

#[derive(Clone)]
pub struct ClickhouseRepo {
    client: Client,
    database: String,
}

impl ClickhouseRepo {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    pub fn connect(config: &DbConfig) -> Self {
        let client = Client::default()
            .with_url(config.url())
            .with_user(&config.user)
            .with_password(&config.password)
            .with_database(&config.database);
        Self::new(client, config.database.clone())
    }
}

#[async_trait]
impl EventRepository for ClickhouseRepo {
    async fn ensure_schema(&self) -> Result<()> {
        let mut statements = schema_statements(&self.database).into_iter();
        // the target database may not exist yet, so create it from `default`
        if let Some(create_db) = statements.next() {
            self.client
                .clone()
                .with_database("default")
                .query(&create_db)
                .execute()
                .await?;
        }
        for statement in statements {
            self.client.query(&statement).execute().await?;
        }
        Ok(())
    }

    async fn insert_event(&self, event: &Event) -> Result<()> {
        let mut insert = self.client.insert("events")?;
        insert.write(&EventRow::from(event)).await?;
        insert.end().await?;
        Ok(())
    }

    async fn insert_stream(&self, stream: &Stream) -> Result<()> {
        let mut insert = self.client.insert("streams")?;
        insert.write(&StreamRow::from(stream)).await?;
        insert.end().await?;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let _: u8 = self.client.query("SELECT toUInt8(1)").fetch_one().await?;
        Ok(())
    }
}
