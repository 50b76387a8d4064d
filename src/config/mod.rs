//! Layered configuration: explicit arguments > environment > YAML file >
//! defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{OffersError, Result};
use crate::http::BackendKind;

/// Default TTL for the offers cache, in seconds.
pub const DEFAULT_TTL_SECONDS: u64 = 60;

/// Resolved SDK configuration.
#[derive(Debug, Clone)]
pub struct SdkConfig {
    pub api_base_url: String,
    pub refresh_token: String,
    pub backend: BackendKind,
    pub ttl_seconds: u64,
}

/// Explicit values taking precedence over every other source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_base_url: Option<String>,
    pub refresh_token: Option<String>,
    pub backend: Option<String>,
    pub config_path: Option<PathBuf>,
    pub ttl_seconds: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_base_url: Option<String>,
    refresh_token: Option<String>,
    backend: Option<String>,
    ttl_seconds: Option<u64>,
}

impl SdkConfig {
    /// Resolve the configuration from all layers, failing fast when the base
    /// URL or refresh token remain unset or the backend name is unknown.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        let _ = dotenvy::dotenv();

        let file = overrides
            .config_path
            .as_deref()
            .map(load_config_file)
            .unwrap_or_default();

        let api_base_url =
            resolve_value(overrides.api_base_url, "API_BASE_URL", file.api_base_url);
        let refresh_token =
            resolve_value(overrides.refresh_token, "REFRESH_TOKEN", file.refresh_token);
        let backend_name = resolve_value(overrides.backend, "BACKEND", file.backend)
            .unwrap_or_else(|| BackendKind::Reqwest.to_string());

        let ttl_seconds = match overrides.ttl_seconds {
            Some(ttl) => ttl,
            None => match env_value("TTL_SECONDS") {
                Some(raw) => raw.parse::<u64>().map_err(|_| {
                    OffersError::Config(format!("invalid TTL_SECONDS value: {raw}"))
                })?,
                None => file.ttl_seconds.unwrap_or(DEFAULT_TTL_SECONDS),
            },
        };

        let api_base_url = api_base_url
            .filter(|value| !value.is_empty())
            .ok_or_else(|| OffersError::Config("API base URL must be set".into()))?;
        let refresh_token = refresh_token
            .filter(|value| !value.is_empty())
            .ok_or_else(|| OffersError::Config("refresh token must be set".into()))?;
        let backend = backend_name
            .parse::<BackendKind>()
            .map_err(|_| OffersError::Config(format!("invalid backend: {backend_name}")))?;

        debug!(
            base_url = %api_base_url,
            %backend,
            ttl_seconds,
            "resolved SDK configuration"
        );

        Ok(Self {
            api_base_url,
            refresh_token,
            backend,
            ttl_seconds,
        })
    }
}

fn load_config_file(path: &Path) -> FileConfig {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not open config file");
            return FileConfig::default();
        }
    };

    match serde_yaml::from_str::<Option<FileConfig>>(&raw) {
        Ok(parsed) => parsed.unwrap_or_default(),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "YAML parsing error in config file");
            FileConfig::default()
        }
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn resolve_value(direct: Option<String>, env_key: &str, file_value: Option<String>) -> Option<String> {
    direct.or_else(|| env_value(env_key)).or(file_value)
}
