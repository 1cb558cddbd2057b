use super::{settings_from, Settings};

use std::{collections::HashMap, path::PathBuf};

#[test]
fn defaults_bind_locally() {
    let settings = settings_from(&HashMap::new(), |_| None);
    let defaults = Settings::default();
    assert_eq!(settings.bind_addr, defaults.bind_addr);
    assert_eq!(settings.fixtures_path, PathBuf::from("fixtures.toml"));
}

#[test]
fn prefixed_env_wins_over_legacy_env_and_file() {
    let file_cfg = HashMap::from([
        ("bind_addr".to_string(), "0.0.0.0:4000".to_string()),
        ("fixtures_path".to_string(), "from-file.toml".to_string()),
    ]);
    let settings = settings_from(&file_cfg, |name| match name {
        "STUB_BIND" => Some("127.0.0.1:5000".to_string()),
        "APP__BIND_ADDR" => Some("127.0.0.1:6000".to_string()),
        _ => None,
    });
    assert_eq!(settings.bind_addr, "127.0.0.1:6000");
    assert_eq!(settings.fixtures_path, PathBuf::from("from-file.toml"));
}

#[test]
fn fixtures_path_from_env() {
    let settings = settings_from(&HashMap::new(), |name| {
        (name == "APP__FIXTURES_PATH").then(|| "/srv/reviews.toml".to_string())
    });
    assert_eq!(settings.fixtures_path, PathBuf::from("/srv/reviews.toml"));
}
