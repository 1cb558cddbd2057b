use std::{collections::HashMap, fs, path::Path, time::Duration};

use serde::Deserialize;
use tracing::warn;

use crate::{review_source::ReviewSource, session::EmptyPagePolicy};

pub const CLIENT_CONFIG_FILE: &str = "client.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSettings {
    pub scrape_endpoint: String,
    pub review_source_url: String,
    pub request_timeout_secs: u64,
    pub empty_page_policy: EmptyPagePolicy,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            scrape_endpoint: "http://127.0.0.1:3000/api/scrape".into(),
            review_source_url: crate::review_source::DEFAULT_REVIEW_SOURCE_URL.into(),
            request_timeout_secs: 30,
            empty_page_policy: EmptyPagePolicy::Error,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn review_source(&self) -> Result<ReviewSource, url::ParseError> {
        ReviewSource::parse(&self.review_source_url)
    }
}

/// Defaults, then `client.toml` in the working directory, then environment.
pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(CLIENT_CONFIG_FILE), |name| std::env::var(name).ok())
}

pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<HashMap<String, toml::Value>>(&raw) {
            Ok(file_cfg) => apply_overrides(&mut settings, |key| {
                file_cfg.get(key).map(|value| match value {
                    toml::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
            }),
            Err(err) => warn!(path = %path.display(), %err, "ignoring unreadable client config"),
        }
    }

    apply_overrides(&mut settings, |key| {
        let upper = key.to_ascii_uppercase();
        env(&format!("APP__{upper}")).or_else(|| match key {
            "scrape_endpoint" => env("SCRAPE_ENDPOINT"),
            "review_source_url" => env("REVIEW_SOURCE_URL"),
            _ => None,
        })
    });

    settings
}

fn apply_overrides(settings: &mut ClientSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("scrape_endpoint") {
        settings.scrape_endpoint = v;
    }
    if let Some(v) = lookup("review_source_url") {
        settings.review_source_url = v;
    }
    if let Some(v) = lookup("request_timeout_secs") {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = parsed,
            Err(err) => warn!(value = %v, %err, "ignoring invalid request_timeout_secs"),
        }
    }
    if let Some(v) = lookup("empty_page_policy") {
        match v.parse::<EmptyPagePolicy>() {
            Ok(policy) => settings.empty_page_policy = policy,
            Err(err) => warn!(%err, "ignoring invalid empty_page_policy"),
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
