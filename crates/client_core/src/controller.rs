use std::sync::Arc;

use anyhow::{Context, Result};
use shared::{domain::QueryParams, error::FetchError};
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    config::ClientSettings,
    review_source::ReviewSource,
    session::{
        EmptyPagePolicy, FetchTicket, Resolution, ReviewSession, SessionError, SessionSnapshot,
    },
    transport::{HttpScrapeTransport, ScrapeTransport},
};

/// Runs the network call for one ticket. The caller resolves the outcome
/// against the session that issued the ticket.
pub async fn fetch_page(
    transport: &dyn ScrapeTransport,
    source: &ReviewSource,
    ticket: &FetchTicket,
) -> Result<Vec<String>, FetchError> {
    let request = source.request_for(ticket);
    info!(
        college_id = %ticket.params.college_id,
        review_type = %ticket.params.review_type,
        page = ticket.page,
        generation = ticket.generation,
        "fetching review page"
    );
    let outcome = transport.scrape(&request).await;
    if let Ok(content) = &outcome {
        info!(page = ticket.page, items = content.len(), "review page fetched");
    }
    outcome
}

pub struct ReviewFetchController {
    transport: Arc<dyn ScrapeTransport>,
    source: ReviewSource,
    session: Mutex<ReviewSession>,
}

impl ReviewFetchController {
    pub fn new(
        transport: Arc<dyn ScrapeTransport>,
        source: ReviewSource,
        policy: EmptyPagePolicy,
    ) -> Self {
        Self {
            transport,
            source,
            session: Mutex::new(ReviewSession::new(policy)),
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        let source = settings.review_source().with_context(|| {
            format!("invalid review source url '{}'", settings.review_source_url)
        })?;
        let transport =
            HttpScrapeTransport::new(&settings.scrape_endpoint, settings.request_timeout())
                .context("failed to build scrape http client")?;
        info!(endpoint = transport.endpoint(), "scrape transport ready");
        Ok(Self::new(
            Arc::new(transport),
            source,
            settings.empty_page_policy,
        ))
    }

    /// Clears previous results and fetches page 1 for `params`.
    pub async fn submit(&self, params: QueryParams) -> Resolution {
        let ticket = self.session.lock().await.submit(params);
        self.run(ticket).await
    }

    /// Fetches the next page of the last submitted search.
    pub async fn load_more(&self) -> Result<Resolution, SessionError> {
        let ticket = self.session.lock().await.load_more()?;
        Ok(self.run(ticket).await)
    }

    async fn run(&self, ticket: FetchTicket) -> Resolution {
        // The session lock is not held across the request so a newer submit
        // can supersede this ticket while it is in flight.
        let outcome = fetch_page(self.transport.as_ref(), &self.source, &ticket).await;
        self.session.lock().await.resolve(&ticket, outcome)
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.lock().await.snapshot()
    }

    pub async fn can_load_more(&self) -> bool {
        self.session.lock().await.can_load_more()
    }
}
