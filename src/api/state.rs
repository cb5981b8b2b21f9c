use std::sync::Arc;

use crate::config::AppConfig;
use crate::storage::Dataset;

#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, config: AppConfig) -> Self {
        Self {
            dataset,
            config: Arc::new(config),
        }
    }
}
