//! Pure state transitions between the search form, the review session and the
//! worker. Nothing here touches egui or the channels.

use client_core::{FetchTicket, Resolution, ReviewSession};
use shared::{
    domain::{QueryParams, ReviewType},
    error::{FetchError, ValidationError},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub college_id: String,
    pub review_type: ReviewType,
}

impl SearchForm {
    pub fn params(&self) -> Result<QueryParams, ValidationError> {
        QueryParams::parse(&self.college_id, self.review_type)
    }
}

/// "Get Reviews" is enabled unless a page is loading or the id is blank.
pub fn can_submit(form: &SearchForm, session: &ReviewSession) -> bool {
    !session.status().is_loading() && !form.college_id.trim().is_empty()
}

/// "Load More" is shown once results exist, nothing failed and pages remain.
/// It is disabled while a page is loading.
pub fn show_load_more(session: &ReviewSession) -> bool {
    session.offers_load_more()
}

pub fn start_search(
    session: &mut ReviewSession,
    form: &SearchForm,
) -> Result<FetchTicket, ValidationError> {
    let params = form.params()?;
    Ok(session.submit(params))
}

/// Applies a worker result and returns the status line to show, if any.
pub fn apply_page_fetched(
    session: &mut ReviewSession,
    ticket: &FetchTicket,
    outcome: Result<Vec<String>, FetchError>,
) -> Option<String> {
    match session.resolve(ticket, outcome) {
        Resolution::Appended { added } => Some(format!(
            "Loaded {added} review(s) from page {}",
            ticket.page
        )),
        Resolution::Exhausted => Some("No more reviews".to_string()),
        Resolution::Failed(message) => Some(message),
        Resolution::Discarded => None,
    }
}

/// Resolves a ticket that never reached the worker so the session leaves
/// `Loading`.
pub fn abandon_ticket(session: &mut ReviewSession, ticket: &FetchTicket, reason: String) {
    session.resolve(ticket, Err(FetchError::Transport(reason)));
}
