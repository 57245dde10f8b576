use std::time::Duration;
use tracing::{debug, info, Instrument, Span};
use url::Url;

use crate::core::models::SongDetails;
use crate::error::{NetworkError, Result};

/// HTTP client for the song details service.
///
/// One outbound request per lookup, no retries. Deadlines come from the
/// client timeout and from the caller dropping the future.
#[derive(Clone)]
pub struct LookupClient {
    client: reqwest::Client,
    info_url: Url,
    span: Span,
}

impl LookupClient {
    pub fn new(base_url: &str, timeout: Duration, span: Span) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("songlib v{}", version);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(NetworkError::Http)?;

        let info_url = Url::parse(&format!("{}/info", base_url.trim_end_matches('/')))
            .map_err(NetworkError::Url)?;

        Ok(Self {
            client,
            info_url,
            span,
        })
    }

    pub fn info_url(&self) -> &Url {
        &self.info_url
    }

    pub async fn fetch_details(&self, title: &str, group: &str) -> Result<SongDetails> {
        let span = tracing::debug_span!(parent: &self.span, "fetch_details", %title, %group);
        self.request(title, group).instrument(span).await
    }

    async fn request(&self, title: &str, group: &str) -> Result<SongDetails> {
        info!("Requesting song details from {}", self.info_url);

        let response = self
            .client
            .get(self.info_url.clone())
            .query(&[("song", title), ("group", group)])
            .send()
            .await
            .map_err(NetworkError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status { status: status.as_u16() }.into());
        }

        let details: SongDetails = response.json().await.map_err(|e| NetworkError::InvalidResponse {
            reason: e.to_string(),
        })?;

        debug!("Received details: link={}, date={}", details.link, details.release_date);
        Ok(details)
    }
}
