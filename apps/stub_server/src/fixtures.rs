use std::{collections::BTreeMap, fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use shared::domain::ReviewType;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureSet {
    #[serde(default, rename = "college")]
    colleges: Vec<CollegeFixture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollegeFixture {
    pub id: String,
    /// Review type label -> pages, each page a list of snippets.
    #[serde(default)]
    pub reviews: BTreeMap<String, Vec<Vec<String>>>,
}

impl FixtureSet {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read fixtures '{}'", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid fixtures '{}'", path.display()))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let set: FixtureSet = toml::from_str(raw)?;
        for college in &set.colleges {
            for label in college.reviews.keys() {
                label.parse::<ReviewType>().with_context(|| {
                    format!("college '{}' has an unknown review type", college.id)
                })?;
            }
        }
        Ok(set)
    }

    pub fn college_count(&self) -> usize {
        self.colleges.len()
    }

    /// `None` for an unknown college. Known colleges answer every page; pages
    /// past the last one (or for a review type without fixtures) are empty.
    pub fn page(&self, college_id: &str, review_type: ReviewType, page: u32) -> Option<Vec<String>> {
        let college = self.colleges.iter().find(|c| c.id == college_id)?;
        let pages = college
            .reviews
            .iter()
            .find(|(label, _)| label.parse::<ReviewType>().ok() == Some(review_type))
            .map(|(_, pages)| pages.as_slice())
            .unwrap_or_default();
        let content = page
            .checked_sub(1)
            .and_then(|index| pages.get(index as usize))
            .cloned()
            .unwrap_or_default();
        Some(content)
    }
}
