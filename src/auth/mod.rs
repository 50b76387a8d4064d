//! Bearer-token acquisition: refresh-token exchange, in-memory caching, and
//! an optional file-persisting decorator.

pub mod cached;
pub mod client;

pub use cached::FileCachedAuthClient;
pub use client::AuthClient;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// Path of the token exchange endpoint, relative to the API base URL.
pub const AUTH_ENDPOINT: &str = "/auth";

/// Client-asserted access-token lifetime. The auth server supplies no expiry
/// field of its own.
pub const TOKEN_LIFETIME: Duration = Duration::from_secs(360);

/// Produces bearer access tokens for outgoing API calls.
///
/// Implementations cache the token and return it without I/O while it is
/// still live; `force_refresh` bypasses the cache after a 401.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self, lifetime: Duration, force_refresh: bool) -> Result<String>;
}
