use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use tracking_application::AppState;
use tracking_domain::EventRepository;
use tracking_infrastructure::{AppConfig, ClickhouseRepo};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    /// Connects to the store and provisions its schema. Any failure here is
    /// fatal: nothing is served without a working store.
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let runtime_config = config.to_runtime_config()?;
        let db_config = config.to_db_config();
        info!(
            database_url = %db_config.url(),
            database = %db_config.database,
            database_user = %db_config.user,
            "config loaded"
        );

        let repo = Arc::new(ClickhouseRepo::connect(&db_config));
        repo.ensure_schema()
            .await
            .with_context(|| format!("schema provisioning failed at {}", db_config.url()))?;

        Ok(Self::with_repository(runtime_config, repo))
    }

    pub fn with_repository(
        config: tracking_domain::RuntimeConfig,
        repo: Arc<dyn EventRepository>,
    ) -> Self {
        Self {
            state: AppState::new(config, repo),
        }
    }
}
