use super::*;

use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_config(tag: &str, contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("review_client_config_{tag}_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join(CLIENT_CONFIG_FILE);
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn missing_file_and_env_yield_defaults() {
    let settings = load_settings_from(Path::new("/nonexistent/client.toml"), |_| None);
    assert_eq!(settings, ClientSettings::default());
    assert_eq!(settings.request_timeout(), Duration::from_secs(30));
}

#[test]
fn file_values_override_defaults() {
    let path = temp_config(
        "file",
        r#"
scrape_endpoint = "http://10.0.0.5:8080/api/scrape"
request_timeout_secs = 5
empty_page_policy = "end-of-results"
"#,
    );
    let settings = load_settings_from(&path, |_| None);
    assert_eq!(settings.scrape_endpoint, "http://10.0.0.5:8080/api/scrape");
    assert_eq!(settings.request_timeout_secs, 5);
    assert_eq!(settings.empty_page_policy, EmptyPagePolicy::EndOfResults);

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn environment_overrides_file() {
    let path = temp_config("env", "scrape_endpoint = \"http://from-file/api/scrape\"\n");
    let settings = load_settings_from(&path, |name| match name {
        "APP__SCRAPE_ENDPOINT" => Some("http://from-env/api/scrape".to_string()),
        "REVIEW_SOURCE_URL" => Some("http://mirror.test/reviews".to_string()),
        _ => None,
    });
    assert_eq!(settings.scrape_endpoint, "http://from-env/api/scrape");
    assert_eq!(settings.review_source_url, "http://mirror.test/reviews");

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn invalid_numbers_and_policies_are_ignored() {
    let settings = load_settings_from(Path::new("/nonexistent/client.toml"), |name| match name {
        "APP__REQUEST_TIMEOUT_SECS" => Some("soon".to_string()),
        "APP__EMPTY_PAGE_POLICY" => Some("maybe".to_string()),
        _ => None,
    });
    assert_eq!(settings.request_timeout_secs, 30);
    assert_eq!(settings.empty_page_policy, EmptyPagePolicy::Error);
}

#[test]
fn zero_timeout_is_clamped_to_one_second() {
    let settings = ClientSettings {
        request_timeout_secs: 0,
        ..ClientSettings::default()
    };
    assert_eq!(settings.request_timeout(), Duration::from_secs(1));
}

#[test]
fn default_review_source_parses() {
    assert!(ClientSettings::default().review_source().is_ok());
}
