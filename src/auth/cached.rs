use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

use super::{AuthClient, TokenProvider};

#[derive(Debug, Serialize, Deserialize)]
struct TokenCacheFile {
    access_token: String,
    token_expiry: i64,
}

/// Decorator over [`AuthClient`] persisting the access token between
/// process runs.
///
/// The cache file is loaded at construction only while unexpired, and
/// rewritten after every exchange that produced a new token. All file
/// read/parse/write failures are logged and treated as cache misses, never
/// as fatal errors.
pub struct FileCachedAuthClient {
    inner: AuthClient,
    cache_path: PathBuf,
    last_saved: Mutex<Option<String>>,
}

impl FileCachedAuthClient {
    pub fn new(inner: AuthClient, cache_path: PathBuf) -> Self {
        let client = Self {
            inner,
            cache_path,
            last_saved: Mutex::new(None),
        };
        client.load_cache();
        client
    }

    /// Default cache location under the user's home directory.
    pub fn default_path() -> PathBuf {
        directories::UserDirs::new()
            .map(|dirs| dirs.home_dir().join(".offers-sdk").join("token_cache.json"))
            .unwrap_or_else(|| PathBuf::from(".offers-sdk/token_cache.json"))
    }

    fn load_cache(&self) {
        let raw = match fs::read_to_string(&self.cache_path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return,
            Err(err) => {
                warn!(path = %self.cache_path.display(), error = %err, "failed to read token cache file");
                return;
            }
        };

        let data: TokenCacheFile = match serde_json::from_str(&raw) {
            Ok(data) => data,
            Err(err) => {
                warn!(path = %self.cache_path.display(), error = %err, "invalid JSON in token cache file");
                return;
            }
        };

        let Some(expiry) = Utc.timestamp_opt(data.token_expiry, 0).single() else {
            warn!(path = %self.cache_path.display(), "invalid expiry in token cache file");
            return;
        };

        if Utc::now() < expiry {
            self.inner.prime_token(data.access_token.clone(), expiry);
            *self.last_saved.lock().unwrap() = Some(data.access_token);
        }
    }

    fn save_cache(&self, token: &str, expires_at: DateTime<Utc>) {
        if let Some(parent) = self.cache_path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                warn!(path = %self.cache_path.display(), error = %err, "cannot create token cache directory");
                return;
            }
        }

        let data = TokenCacheFile {
            access_token: token.to_string(),
            token_expiry: expires_at.timestamp(),
        };
        let serialized = match serde_json::to_string(&data) {
            Ok(serialized) => serialized,
            Err(err) => {
                warn!(error = %err, "failed to serialize token cache");
                return;
            }
        };
        if let Err(err) = fs::write(&self.cache_path, serialized) {
            warn!(path = %self.cache_path.display(), error = %err, "failed to write token cache file");
        }
    }
}

#[async_trait]
impl TokenProvider for FileCachedAuthClient {
    async fn access_token(&self, lifetime: Duration, force_refresh: bool) -> Result<String> {
        let token = self.inner.access_token(lifetime, force_refresh).await?;

        let changed = {
            let mut last_saved = self.last_saved.lock().unwrap();
            if last_saved.as_deref() != Some(token.as_str()) {
                *last_saved = Some(token.clone());
                true
            } else {
                false
            }
        };

        if changed {
            if let Some((_, expires_at)) = self.inner.cached_token() {
                self.save_cache(&token, expires_at);
            }
        }

        Ok(token)
    }
}
