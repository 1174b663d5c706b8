use crate::auth::{Authenticator, SessionStore, SharedPassword};
use crate::config::Config;
use crate::errors::DashboardError;
use crate::storage::{Dataset, DatasetCache};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cache: Arc<Mutex<DatasetCache>>,
    pub sessions: Arc<Mutex<SessionStore>>,
    pub authenticator: Arc<dyn Authenticator>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let authenticator = Arc::new(SharedPassword::new(config.password.clone()));
        Self::with_authenticator(config, authenticator)
    }

    pub fn with_authenticator(config: Config, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            config: Arc::new(config),
            cache: Arc::new(Mutex::new(DatasetCache::new())),
            sessions: Arc::new(Mutex::new(SessionStore::default())),
            authenticator,
        }
    }

    /// The current dataset, reloaded if the input file changed on disk.
    pub async fn dataset(&self) -> Result<Arc<Dataset>, DashboardError> {
        let mut cache = self.cache.lock().await;
        cache.get_or_load(&self.config.data_path).await
    }
}
