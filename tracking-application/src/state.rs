use std::sync::Arc;

use tracking_domain::ports::EventRepository;
use tracking_domain::RuntimeConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub event_repo: Arc<dyn EventRepository>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: RuntimeConfig, event_repo: Arc<dyn EventRepository>) -> Self {
        Self {
            config,
            event_repo,
            metrics: Arc::new(Metrics::default()),
        }
    }
}
