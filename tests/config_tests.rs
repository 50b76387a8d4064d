//! Layered configuration resolution tests.
//!
//! Tests touching process environment serialize on a lock and scrub the
//! SDK's variables before running.

use std::fs;
use std::sync::Mutex;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use offers_sdk::config::{ConfigOverrides, SdkConfig};
use offers_sdk::error::OffersError;
use offers_sdk::http::BackendKind;

static ENV_LOCK: Mutex<()> = Mutex::new(());

const ENV_KEYS: [&str; 4] = ["API_BASE_URL", "REFRESH_TOKEN", "BACKEND", "TTL_SECONDS"];

fn scrubbed_env() -> std::sync::MutexGuard<'static, ()> {
    let guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
    guard
}

fn overrides(base_url: &str, refresh_token: &str) -> ConfigOverrides {
    ConfigOverrides {
        api_base_url: Some(base_url.to_string()),
        refresh_token: Some(refresh_token.to_string()),
        ..ConfigOverrides::default()
    }
}

#[test]
fn explicit_arguments_win_over_everything() {
    let _guard = scrubbed_env();
    std::env::set_var("API_BASE_URL", "http://from-env");
    std::env::set_var("REFRESH_TOKEN", "env-token");
    std::env::set_var("BACKEND", "hyper");

    let config = SdkConfig::resolve(ConfigOverrides {
        api_base_url: Some("http://from-arg".into()),
        refresh_token: Some("arg-token".into()),
        backend: Some("blocking".into()),
        ..ConfigOverrides::default()
    })
    .unwrap();

    assert_eq!(config.api_base_url, "http://from-arg");
    assert_eq!(config.refresh_token, "arg-token");
    assert_eq!(config.backend, BackendKind::Blocking);
}

#[test]
fn environment_fills_in_missing_arguments() {
    let _guard = scrubbed_env();
    std::env::set_var("API_BASE_URL", "http://from-env");
    std::env::set_var("REFRESH_TOKEN", "env-token");
    std::env::set_var("TTL_SECONDS", "120");

    let config = SdkConfig::resolve(ConfigOverrides::default()).unwrap();

    assert_eq!(config.api_base_url, "http://from-env");
    assert_eq!(config.refresh_token, "env-token");
    assert_eq!(config.backend, BackendKind::Reqwest);
    assert_eq!(config.ttl_seconds, 120);
}

#[test]
fn yaml_file_fills_in_below_environment() {
    let _guard = scrubbed_env();
    std::env::set_var("REFRESH_TOKEN", "env-token");

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(
        &path,
        "api_base_url: http://from-yaml\nrefresh_token: yaml-token\nbackend: hyper\nttl_seconds: 30\n",
    )
    .unwrap();

    let config = SdkConfig::resolve(ConfigOverrides {
        config_path: Some(path),
        ..ConfigOverrides::default()
    })
    .unwrap();

    assert_eq!(config.api_base_url, "http://from-yaml");
    // env var beats the YAML value
    assert_eq!(config.refresh_token, "env-token");
    assert_eq!(config.backend, BackendKind::Hyper);
    assert_eq!(config.ttl_seconds, 30);
}

#[test]
fn defaults_apply_when_no_source_sets_them() {
    let _guard = scrubbed_env();

    let config = SdkConfig::resolve(overrides("http://api", "token")).unwrap();

    assert_eq!(config.backend, BackendKind::Reqwest);
    assert_eq!(config.ttl_seconds, 60);
}

#[test]
fn missing_base_url_fails_fast() {
    let _guard = scrubbed_env();

    let result = SdkConfig::resolve(ConfigOverrides {
        refresh_token: Some("token".into()),
        ..ConfigOverrides::default()
    });
    assert!(matches!(result, Err(OffersError::Config(_))));
}

#[test]
fn missing_refresh_token_fails_fast() {
    let _guard = scrubbed_env();

    let result = SdkConfig::resolve(ConfigOverrides {
        api_base_url: Some("http://api".into()),
        ..ConfigOverrides::default()
    });
    assert!(matches!(result, Err(OffersError::Config(_))));
}

#[test]
fn unknown_backend_identifier_fails_fast() {
    let _guard = scrubbed_env();

    let result = SdkConfig::resolve(ConfigOverrides {
        backend: Some("curl".into()),
        ..overrides("http://api", "token")
    });

    match result {
        Err(OffersError::Config(message)) => {
            assert!(message.contains("curl"), "unexpected: {message}");
        }
        other => panic!("expected Config error, got {other:?}"),
    }
}

#[test]
fn blank_environment_values_are_ignored() {
    let _guard = scrubbed_env();
    std::env::set_var("API_BASE_URL", "   ");
    std::env::set_var("REFRESH_TOKEN", "env-token");

    let result = SdkConfig::resolve(ConfigOverrides::default());
    // blank base URL counts as unset
    assert!(matches!(result, Err(OffersError::Config(_))));
}

#[test]
fn unreadable_yaml_degrades_to_empty() {
    let _guard = scrubbed_env();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, ":: this is not yaml ::[").unwrap();

    let config = SdkConfig::resolve(ConfigOverrides {
        config_path: Some(path),
        ..overrides("http://api", "token")
    })
    .unwrap();

    assert_eq!(config.api_base_url, "http://api");
}

#[test]
fn missing_yaml_file_degrades_to_empty() {
    let _guard = scrubbed_env();

    let config = SdkConfig::resolve(ConfigOverrides {
        config_path: Some("/definitely/not/here.yaml".into()),
        ..overrides("http://api", "token")
    })
    .unwrap();

    assert_eq!(config.refresh_token, "token");
}

#[test]
fn invalid_ttl_environment_value_is_a_config_error() {
    let _guard = scrubbed_env();
    std::env::set_var("API_BASE_URL", "http://api");
    std::env::set_var("REFRESH_TOKEN", "token");
    std::env::set_var("TTL_SECONDS", "soon");

    let result = SdkConfig::resolve(ConfigOverrides::default());
    assert!(matches!(result, Err(OffersError::Config(_))));
}
