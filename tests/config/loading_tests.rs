// Config loading from disk

use cascade_core::{AppConfig, ConfigError, ProviderId};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("cascade.toml");
    fs::write(&path, content).expect("write config");
    path
}

#[test]
fn explicit_missing_path_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("absent.toml");

    let result = AppConfig::load(Some(&path));

    assert!(matches!(result, Err(ConfigError::NotFound { .. })));
}

#[test]
fn file_settings_override_defaults() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(
        &dir,
        r#"
bind = "127.0.0.1:9191"
request_timeout_secs = 12

[polling]
max_polls = 5
interval_ms = 200

[providers.openai]
api_key = "sk-literal"
model = "gpt-4o"

[providers.replicate]
api_key_env = "CASCADE_TEST_UNSET_REPLICATE_TOKEN"
endpoint = "http://localhost:7000"
"#,
    );

    let config = AppConfig::load(Some(&path)).expect("config loads");

    assert_eq!(config.bind.port(), 9191);
    assert_eq!(config.request_timeout, Duration::from_secs(12));
    assert_eq!(config.polling.max_polls, 5);
    assert_eq!(config.polling.interval, Duration::from_millis(200));

    let openai = config.providers.get(ProviderId::OpenAi);
    assert_eq!(openai.credential(), Some("sk-literal"));
    assert_eq!(openai.model, "gpt-4o");

    let replicate = config.providers.get(ProviderId::Replicate);
    assert_eq!(replicate.api_key_env, "CASCADE_TEST_UNSET_REPLICATE_TOKEN");
    assert_eq!(replicate.credential(), None);
    assert_eq!(replicate.endpoint, "http://localhost:7000");
}

#[test]
fn malformed_file_reports_its_path() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(&dir, "[polling\nmax_polls = 3");

    match AppConfig::load(Some(&path)) {
        Err(ConfigError::Parse { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn unknown_provider_tables_are_ignored() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(&dir, "[providers.ollama]\nmodel = \"llama3\"\n");

    let config = AppConfig::load(Some(&path)).expect("config loads");

    let ids: Vec<ProviderId> = config.providers.iter().map(|p| p.id).collect();
    assert_eq!(ids, ProviderId::PRIORITY);
}
