use crate::api::StatsClient;
use crate::config::Config;
use crate::errors::LoadError;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub stats: StatsClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, LoadError> {
        let stats = StatsClient::new(config.stats_api_root.clone())?;
        Ok(Self {
            config: Arc::new(config),
            stats,
        })
    }
}
