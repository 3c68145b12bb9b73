//! Application state for club-sync

use std::sync::Arc;

use brivo_client::{AccessService, BrivoClient};

use crate::config::{Config, StoreKind};
use crate::db::{MemoryStore, PgStore, Store};
use crate::error::BoxError;
use crate::services::SyncService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sync: SyncService,
}

impl AppState {
    pub fn new(sync: SyncService) -> Self {
        Self { sync }
    }

    /// Build the store and the Brivo client described by `config`
    pub async fn from_config(config: &Config) -> Result<Self, BoxError> {
        let store: Arc<dyn Store> = match (config.store, &config.database_url) {
            (StoreKind::Postgres, Some(url)) => Arc::new(PgStore::connect(url).await?),
            (StoreKind::Postgres, None) => return Err("DATABASE_URL must be set".into()),
            (StoreKind::Memory, _) => {
                tracing::warn!("Using in-memory store, data is lost on restart");
                Arc::new(MemoryStore::new())
            }
        };

        let missing = config.brivo.missing_fields();
        if !missing.is_empty() {
            tracing::warn!(?missing, "Brivo settings incomplete, remote calls will fail");
        }
        let access: Arc<dyn AccessService> = Arc::new(BrivoClient::new(config.brivo.clone())?);

        Ok(Self::new(SyncService::new(store, access)))
    }
}
