use thiserror::Error;

pub const TRANSPORT_FAILURE_MESSAGE: &str = "Failed to fetch";
pub const BACKEND_FAILURE_MESSAGE: &str = "Failed to fetch reviews";
pub const NO_REVIEWS_MESSAGE: &str = "No reviews found";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("college id must not be empty")]
    EmptyCollegeId,
    #[error("unknown review type '{0}'")]
    UnknownReviewType(String),
}

/// Failure of a single page fetch against the scrape endpoint.
///
/// The `Display` output carries diagnostic detail for logs; what the user
/// sees comes from [`FetchError::user_message`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("scrape endpoint returned status {status}")]
    Backend { status: u16, message: Option<String> },
    #[error("malformed scrape response: {0}")]
    Malformed(String),
    #[error("scrape endpoint returned no content")]
    Empty,
}

impl FetchError {
    pub fn backend(status: u16, message: Option<String>) -> Self {
        let message = message.filter(|m| !m.trim().is_empty());
        Self::Backend { status, message }
    }

    pub fn user_message(&self) -> String {
        match self {
            FetchError::Transport(_) => TRANSPORT_FAILURE_MESSAGE.to_string(),
            FetchError::Backend {
                message: Some(message),
                ..
            } => message.clone(),
            FetchError::Backend { message: None, .. } | FetchError::Malformed(_) => {
                BACKEND_FAILURE_MESSAGE.to_string()
            }
            FetchError::Empty => NO_REVIEWS_MESSAGE.to_string(),
        }
    }
}
