//! Pagination state for one review search.
//!
//! [`ReviewSession`] owns the query, the page cursor, the accumulated reviews
//! and the request status. Transitions are plain synchronous methods:
//! `submit` and `load_more` hand back a [`FetchTicket`] describing the page to
//! fetch, and `resolve` applies whatever the fetch produced. Nothing here does
//! I/O, so the same session drives the async controller, the CLI and the GUI.
//!
//! Every submit starts a new generation. A ticket from an older generation is
//! discarded on resolve, so a slow response to a superseded search can never
//! leak into the current result list.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shared::{domain::QueryParams, error::FetchError};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Error(String),
}

impl RequestStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestStatus::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RequestStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// What a successful but empty page means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPagePolicy {
    /// Always report "No reviews found".
    #[default]
    Error,
    /// Past the first page, an empty page ends pagination without an error.
    EndOfResults,
}

impl FromStr for EmptyPagePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "error" => Ok(Self::Error),
            "end_of_results" => Ok(Self::EndOfResults),
            other => Err(format!("unknown empty page policy '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub page: u32,
    pub params: QueryParams,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Appended { added: usize },
    Exhausted,
    Failed(String),
    /// The ticket belonged to a superseded search or was already resolved.
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no search has been submitted yet")]
    NoActiveQuery,
    #[error("a page is already loading")]
    AlreadyLoading,
    #[error("the last request failed: {0}")]
    ErrorPresent(String),
    #[error("all review pages have been loaded")]
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub params: Option<QueryParams>,
    pub cursor: u32,
    pub reviews: Vec<String>,
    pub status: RequestStatus,
    pub exhausted: bool,
    pub generation: u64,
}

impl SessionSnapshot {
    pub fn can_load_more(&self) -> bool {
        load_more_allowed(self.params.as_ref(), &self.reviews, &self.status, self.exhausted)
    }
}

/// Results exist, nothing failed and pages remain. A page may still be loading.
fn load_more_offered(reviews: &[String], status: &RequestStatus, exhausted: bool) -> bool {
    !reviews.is_empty() && status.error_message().is_none() && !exhausted
}

fn load_more_allowed(
    params: Option<&QueryParams>,
    reviews: &[String],
    status: &RequestStatus,
    exhausted: bool,
) -> bool {
    params.is_some() && !status.is_loading() && load_more_offered(reviews, status, exhausted)
}

#[derive(Debug, Clone)]
pub struct ReviewSession {
    policy: EmptyPagePolicy,
    params: Option<QueryParams>,
    cursor: u32,
    reviews: Vec<String>,
    status: RequestStatus,
    exhausted: bool,
    generation: u64,
    in_flight: Option<u32>,
}

impl Default for ReviewSession {
    fn default() -> Self {
        Self::new(EmptyPagePolicy::default())
    }
}

impl ReviewSession {
    pub fn new(policy: EmptyPagePolicy) -> Self {
        Self {
            policy,
            params: None,
            cursor: 1,
            reviews: Vec::new(),
            status: RequestStatus::Idle,
            exhausted: false,
            generation: 0,
            in_flight: None,
        }
    }

    /// Starts a fresh search: clears results, rewinds the cursor to page 1 and
    /// supersedes any request still in flight.
    pub fn submit(&mut self, params: QueryParams) -> FetchTicket {
        self.generation += 1;
        self.params = Some(params.clone());
        self.cursor = 1;
        self.reviews.clear();
        self.exhausted = false;
        self.begin(params)
    }

    pub fn load_more(&mut self) -> Result<FetchTicket, SessionError> {
        let params = self.params.clone().ok_or(SessionError::NoActiveQuery)?;
        match &self.status {
            RequestStatus::Loading => return Err(SessionError::AlreadyLoading),
            RequestStatus::Error(message) => {
                return Err(SessionError::ErrorPresent(message.clone()))
            }
            RequestStatus::Idle => {}
        }
        if self.exhausted {
            return Err(SessionError::Exhausted);
        }

        self.cursor += 1;
        Ok(self.begin(params))
    }

    fn begin(&mut self, params: QueryParams) -> FetchTicket {
        self.status = RequestStatus::Loading;
        self.in_flight = Some(self.cursor);
        FetchTicket {
            generation: self.generation,
            page: self.cursor,
            params,
        }
    }

    pub fn resolve(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<Vec<String>, FetchError>,
    ) -> Resolution {
        if ticket.generation != self.generation || self.in_flight != Some(ticket.page) {
            debug!(
                ticket_generation = ticket.generation,
                current_generation = self.generation,
                page = ticket.page,
                "discarding stale review page"
            );
            return Resolution::Discarded;
        }
        self.in_flight = None;

        let content = match outcome {
            Ok(content) => content,
            Err(err) => {
                warn!(page = ticket.page, %err, "review page fetch failed");
                return self.fail(err);
            }
        };

        if !content.is_empty() {
            let added = content.len();
            self.reviews.extend(content);
            self.status = RequestStatus::Idle;
            return Resolution::Appended { added };
        }

        match self.policy {
            EmptyPagePolicy::EndOfResults if !self.reviews.is_empty() => {
                self.exhausted = true;
                self.status = RequestStatus::Idle;
                Resolution::Exhausted
            }
            _ => self.fail(FetchError::Empty),
        }
    }

    fn fail(&mut self, err: FetchError) -> Resolution {
        let message = err.user_message();
        self.status = RequestStatus::Error(message.clone());
        Resolution::Failed(message)
    }

    pub fn can_load_more(&self) -> bool {
        load_more_allowed(self.params.as_ref(), &self.reviews, &self.status, self.exhausted)
    }

    /// Whether a "Load More" affordance should be shown at all; it stays
    /// visible but disabled while a page is loading.
    pub fn offers_load_more(&self) -> bool {
        load_more_offered(&self.reviews, &self.status, self.exhausted)
    }

    pub fn params(&self) -> Option<&QueryParams> {
        self.params.as_ref()
    }

    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    pub fn reviews(&self) -> &[String] {
        &self.reviews
    }

    pub fn status(&self) -> &RequestStatus {
        &self.status
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn policy(&self) -> EmptyPagePolicy {
        self.policy
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            params: self.params.clone(),
            cursor: self.cursor,
            reviews: self.reviews.clone(),
            status: self.status.clone(),
            exhausted: self.exhausted,
            generation: self.generation,
        }
    }
}
