use std::sync::Arc;
use crate::config::Config;
use crate::core::catalog::Catalog;
use crate::core::data::database::Database;
use crate::core::services::LookupClient;
use crate::error::Result;
use crate::services::SqliteStore;
use tracing::debug;

/// Centralized factory for creating all core services
pub struct ServiceFactory {
    config: Arc<Config>,
}

impl ServiceFactory {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Open (and migrate) the configured database
    pub async fn create_database(&self) -> Result<Arc<Database>> {
        let path = self.config.database_path.clone();
        let db = tokio::task::spawn_blocking(move || {
            let db = Database::open(&path)?;
            debug!("Database holds {} song(s)", db.count_songs()?);
            Ok::<Database, crate::error::SongLibError>(db)
        })
        .await??;
        Ok(Arc::new(db))
    }

    /// Base URL the lookup client talks to. The built-in stub wins when enabled.
    pub fn lookup_base_url(&self) -> String {
        if self.config.use_stub_api {
            format!("http://127.0.0.1:{}", self.config.stub_api_port)
        } else {
            self.config.lookup_api_url.clone()
        }
    }

    pub fn create_lookup_client(&self) -> Result<LookupClient> {
        let client = LookupClient::new(
            &self.lookup_base_url(),
            self.config.request_timeout(),
            tracing::info_span!("lookup"),
        )?;
        debug!("Lookup client targets {}", client.info_url());
        Ok(client)
    }

    /// Wire the catalog over the configured store and lookup service
    pub async fn create_catalog(&self) -> Result<Arc<Catalog>> {
        let store = Arc::new(SqliteStore::new(self.create_database().await?));
        let lookup = Arc::new(self.create_lookup_client()?);

        Ok(Arc::new(Catalog::new(store, lookup, tracing::info_span!("catalog"))))
    }

    /// Get configuration reference
    pub fn config(&self) -> Arc<Config> {
        self.config.clone()
    }
}
