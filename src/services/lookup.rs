use crate::core::models::SongDetails;
use crate::core::services::lookup::LookupClient;
use crate::error::Result;

/// Source of canonical song metadata, consulted once per created song.
#[async_trait::async_trait]
pub trait SongLookup: Send + Sync {
    async fn lookup(&self, title: &str, group: &str) -> Result<SongDetails>;
}

#[async_trait::async_trait]
impl SongLookup for LookupClient {
    async fn lookup(&self, title: &str, group: &str) -> Result<SongDetails> {
        self.fetch_details(title, group).await
    }
}
