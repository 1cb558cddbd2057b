use std::{collections::HashMap, fs, path::PathBuf};

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub bind_addr: String,
    pub fixtures_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".into(),
            fixtures_path: PathBuf::from("fixtures.toml"),
        }
    }
}

pub fn load_settings() -> Settings {
    let file_cfg = fs::read_to_string("stub_server.toml")
        .ok()
        .and_then(|raw| toml::from_str::<HashMap<String, String>>(&raw).ok())
        .unwrap_or_default();
    settings_from(&file_cfg, |name| std::env::var(name).ok())
}

fn settings_from(
    file_cfg: &HashMap<String, String>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(v) = file_cfg.get("bind_addr") {
        settings.bind_addr = v.clone();
    }
    if let Some(v) = file_cfg.get("fixtures_path") {
        settings.fixtures_path = PathBuf::from(v);
    }

    if let Some(v) = env("STUB_BIND") {
        settings.bind_addr = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.bind_addr = v;
    }
    if let Some(v) = env("APP__FIXTURES_PATH") {
        settings.fixtures_path = PathBuf::from(v);
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
