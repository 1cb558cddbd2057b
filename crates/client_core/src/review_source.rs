use shared::{domain::CollegeId, protocol::ScrapeRequest};
use url::Url;

use crate::session::FetchTicket;

pub const DEFAULT_REVIEW_SOURCE_URL: &str = "https://www.careers360.com/colleges/reviews";

/// Listing page on the review site that the scrape endpoint is asked to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSource {
    base: Url,
}

impl ReviewSource {
    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base: Url::parse(raw.trim())?,
        })
    }

    /// `{base}?page={page}&college_id={college_id}`; pairs are appended after
    /// any query already present on the base.
    pub fn page_url(&self, page: u32, college_id: &CollegeId) -> Url {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("college_id", college_id.as_str());
        url
    }

    pub fn request_for(&self, ticket: &FetchTicket) -> ScrapeRequest {
        ScrapeRequest {
            url: self.page_url(ticket.page, &ticket.params.college_id).into(),
            review_type: ticket.params.review_type,
        }
    }
}

impl Default for ReviewSource {
    fn default() -> Self {
        Self {
            base: Url::parse(DEFAULT_REVIEW_SOURCE_URL).expect("default review source url is valid"),
        }
    }
}
