use crate::domain::error::FairError;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::http::create_client;
use crate::infrastructure::storage::db::SqliteStore;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_rusqlite::Connection;

/// Per-invocation context handed down the call chain.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Connection>,
    pub config: Arc<RwLock<Config>>,
    pub http_client: Client,
}

impl AppState {
    pub fn new(db: Connection, config: Config) -> Result<Self, FairError> {
        let http_client = create_client(&config)?;

        Ok(Self {
            db: Arc::new(db),
            config: Arc::new(RwLock::new(config)),
            http_client,
        })
    }

    pub fn store(&self) -> SqliteStore {
        SqliteStore::new(self.db.clone())
    }
}
