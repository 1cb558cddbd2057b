//! Client side of the review scraper: builds review-page requests, talks to the
//! scrape endpoint, and tracks pagination state across "load more" calls.

pub mod config;
pub mod controller;
pub mod review_source;
pub mod session;
pub mod transport;

pub use config::{load_settings, ClientSettings};
pub use controller::{fetch_page, ReviewFetchController};
pub use review_source::{ReviewSource, DEFAULT_REVIEW_SOURCE_URL};
pub use session::{
    EmptyPagePolicy, FetchTicket, RequestStatus, Resolution, ReviewSession, SessionError,
    SessionSnapshot,
};
pub use transport::{HttpScrapeTransport, ScrapeTransport};

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod session_tests;

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod controller_tests;
