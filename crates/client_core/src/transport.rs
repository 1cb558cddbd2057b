use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::FetchError,
    protocol::{ScrapeRequest, ScrapeResponse},
};
use tracing::warn;

/// Seam between the review session and the scrape collaborator.
///
/// Returns the page content on success. A missing `content` field is reported
/// as an empty page; deciding what an empty page means is left to the session.
#[async_trait]
pub trait ScrapeTransport: Send + Sync {
    async fn scrape(&self, request: &ScrapeRequest) -> Result<Vec<String>, FetchError>;
}

pub struct HttpScrapeTransport {
    http: Client,
    endpoint: String,
}

impl HttpScrapeTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            http: Client::builder().timeout(timeout).build()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ScrapeTransport for HttpScrapeTransport {
    async fn scrape(&self, request: &ScrapeRequest) -> Result<Vec<String>, FetchError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        let decoded = serde_json::from_slice::<ScrapeResponse>(&body);

        if !status.is_success() {
            let message = match decoded {
                Ok(payload) => payload.error,
                Err(err) => {
                    warn!(status = status.as_u16(), %err, "scrape endpoint error body was not json");
                    None
                }
            };
            return Err(FetchError::backend(status.as_u16(), message));
        }

        let payload = decoded.map_err(|err| FetchError::Malformed(err.to_string()))?;
        Ok(payload.content.unwrap_or_default())
    }
}
