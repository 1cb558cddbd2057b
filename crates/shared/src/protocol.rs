use serde::{Deserialize, Serialize};

use crate::domain::ReviewType;

pub const SCRAPE_PATH: &str = "/api/scrape";

/// Body of `POST /api/scrape`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
    #[serde(rename = "reviewType")]
    pub review_type: ReviewType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScrapeResponse {
    pub fn page(content: Vec<String>) -> Self {
        Self {
            content: Some(content),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            content: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_camel_case_review_type_key() {
        let request = ScrapeRequest {
            url: "https://example.test/reviews?page=1&college_id=7".into(),
            review_type: ReviewType::CollegeInfrastructure,
        };
        let value = serde_json::to_value(&request).expect("encode");
        assert_eq!(
            value,
            serde_json::json!({
                "url": "https://example.test/reviews?page=1&college_id=7",
                "reviewType": "College Infrastructure",
            })
        );
    }

    #[test]
    fn response_tolerates_missing_and_null_fields() {
        let empty: ScrapeResponse = serde_json::from_str("{}").expect("decode");
        assert_eq!(empty, ScrapeResponse::default());

        let null_content: ScrapeResponse =
            serde_json::from_str(r#"{"content": null, "error": "blocked"}"#).expect("decode");
        assert_eq!(null_content, ScrapeResponse::failure("blocked"));
    }
}
