use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// College identifier as understood by the review source. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CollegeId(String);

impl CollegeId {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyCollegeId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CollegeId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CollegeId> for String {
    fn from(value: CollegeId) -> Self {
        value.0
    }
}

impl fmt::Display for CollegeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReviewType {
    #[default]
    Academics,
    #[serde(rename = "College Infrastructure")]
    CollegeInfrastructure,
    Placements,
}

impl ReviewType {
    pub const ALL: [ReviewType; 3] = [
        ReviewType::Academics,
        ReviewType::CollegeInfrastructure,
        ReviewType::Placements,
    ];

    /// Label sent on the wire and shown in the category picker.
    pub fn label(self) -> &'static str {
        match self {
            ReviewType::Academics => "Academics",
            ReviewType::CollegeInfrastructure => "College Infrastructure",
            ReviewType::Placements => "Placements",
        }
    }
}

impl fmt::Display for ReviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReviewType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .to_ascii_lowercase()
            .replace(['-', '_'], " ");
        match normalized.as_str() {
            "academics" => Ok(ReviewType::Academics),
            "college infrastructure" | "infrastructure" => Ok(ReviewType::CollegeInfrastructure),
            "placements" => Ok(ReviewType::Placements),
            _ => Err(ValidationError::UnknownReviewType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    pub college_id: CollegeId,
    pub review_type: ReviewType,
}

impl QueryParams {
    pub fn new(college_id: CollegeId, review_type: ReviewType) -> Self {
        Self {
            college_id,
            review_type,
        }
    }

    pub fn parse(college_id: &str, review_type: ReviewType) -> Result<Self, ValidationError> {
        Ok(Self::new(CollegeId::new(college_id)?, review_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn college_id_rejects_blank_input() {
        assert_eq!(CollegeId::new("   "), Err(ValidationError::EmptyCollegeId));
        assert_eq!(CollegeId::new(""), Err(ValidationError::EmptyCollegeId));
    }

    #[test]
    fn college_id_is_trimmed() {
        let id = CollegeId::new("  12345 ").expect("valid id");
        assert_eq!(id.as_str(), "12345");
    }

    #[test]
    fn review_type_accepts_labels_and_aliases() {
        assert_eq!(
            "College Infrastructure".parse::<ReviewType>(),
            Ok(ReviewType::CollegeInfrastructure)
        );
        assert_eq!(
            "college-infrastructure".parse::<ReviewType>(),
            Ok(ReviewType::CollegeInfrastructure)
        );
        assert_eq!(
            "infrastructure".parse::<ReviewType>(),
            Ok(ReviewType::CollegeInfrastructure)
        );
        assert_eq!("PLACEMENTS".parse::<ReviewType>(), Ok(ReviewType::Placements));
        assert!(matches!(
            "hostel".parse::<ReviewType>(),
            Err(ValidationError::UnknownReviewType(_))
        ));
    }

    #[test]
    fn review_type_serializes_with_wire_labels() {
        for review_type in ReviewType::ALL {
            let encoded = serde_json::to_string(&review_type).expect("encode");
            assert_eq!(encoded, format!("\"{}\"", review_type.label()));
        }
    }

    #[test]
    fn blank_college_id_fails_to_deserialize() {
        let decoded = serde_json::from_str::<CollegeId>("\"  \"");
        assert!(decoded.is_err());
    }
}
