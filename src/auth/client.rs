use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{OffersError, Result};
use crate::models::AuthTokenResponse;

use super::{TokenProvider, AUTH_ENDPOINT};

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Exchanges a long-lived refresh token for short-lived access tokens.
///
/// The cached token is returned without any I/O while `now < expires_at`.
/// Concurrent forced refreshes may race; redundant exchanges are tolerated
/// rather than serialized, so the lock is never held across the network
/// call.
pub struct AuthClient {
    refresh_token: Option<String>,
    base_url: Option<String>,
    http: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl AuthClient {
    pub fn new(refresh_token: Option<String>, base_url: Option<String>) -> Self {
        Self {
            refresh_token,
            base_url,
            http: reqwest::Client::new(),
            cached: Mutex::new(None),
        }
    }

    /// Seed the in-memory cache, used by the file-persisting decorator at
    /// startup.
    pub(crate) fn prime_token(&self, value: String, expires_at: DateTime<Utc>) {
        *self.cached.lock().unwrap() = Some(CachedToken { value, expires_at });
    }

    pub(crate) fn cached_token(&self) -> Option<(String, DateTime<Utc>)> {
        self.cached
            .lock()
            .unwrap()
            .as_ref()
            .map(|cached| (cached.value.clone(), cached.expires_at))
    }

    async fn request_new_token(&self, refresh_token: &str) -> Result<String> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or_else(|| OffersError::AuthConfig("base URL is not set".into()))?;

        let auth_url = format!("{base_url}{AUTH_ENDPOINT}");
        debug!(url = %auth_url, "auth request");

        let response = self
            .http
            .post(&auth_url)
            .header("Bearer", refresh_token)
            .send()
            .await
            .map_err(|e| {
                OffersError::AuthRequest(format!("network error during authentication request: {e}"))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            OffersError::AuthRequest(format!("network error during authentication request: {e}"))
        })?;

        if !status.is_success() {
            return Err(OffersError::AuthRequest(format!(
                "authentication failed with status code {}: {body}",
                status.as_u16(),
            )));
        }

        let parsed: AuthTokenResponse = serde_json::from_str(&body).map_err(|e| {
            OffersError::AuthRequest(format!("invalid response structure from auth service: {e}"))
        })?;

        debug!("received new access token");
        Ok(parsed.access_token)
    }
}

#[async_trait]
impl TokenProvider for AuthClient {
    async fn access_token(&self, lifetime: Duration, force_refresh: bool) -> Result<String> {
        let refresh_token = self
            .refresh_token
            .as_deref()
            .ok_or_else(|| OffersError::AuthConfig("refresh token is not set".into()))?;

        if !force_refresh {
            let cached = self.cached.lock().unwrap().clone();
            if let Some(cached) = cached {
                if Utc::now() < cached.expires_at {
                    debug!("using cached access token");
                    return Ok(cached.value);
                }
            }
        }

        debug!("requesting new access token using refresh token");
        let value = self.request_new_token(refresh_token).await?;
        let expires_at = Utc::now() + chrono::Duration::seconds(lifetime.as_secs() as i64);
        self.prime_token(value.clone(), expires_at);
        Ok(value)
    }
}
