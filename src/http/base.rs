//! Shared authenticated-request state machine used by every backend.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::auth::{TokenProvider, TOKEN_LIFETIME};
use crate::error::{OffersError, Result};
use crate::util::retry::RetryPolicy;

use super::hooks::RequestHook;
use super::{BackendResponse, HttpMethod, RequestParams};

/// Body marker the server sends on an expired access token.
const TOKEN_EXPIRED_MARKER: &str = "Access token expired";

/// Auth, hooks, 401-refresh and bounded retry, shared by all backends.
///
/// Per call: obtain a token (no force), run the request hooks, issue the
/// attempt with the bearer header injected, and on a 401 whose body signals
/// an expired token force-refresh once and retry exactly once. The whole
/// operation sits inside the retry policy, which only re-runs transient
/// transport failures.
pub(crate) struct BaseTransport {
    auth: Arc<dyn TokenProvider>,
    hooks: Vec<Arc<dyn RequestHook>>,
    retry: RetryPolicy,
    closed: AtomicBool,
}

impl BaseTransport {
    pub(crate) fn new(auth: Arc<dyn TokenProvider>, hooks: Vec<Arc<dyn RequestHook>>) -> Self {
        Self {
            auth,
            hooks,
            retry: RetryPolicy::default(),
            closed: AtomicBool::new(false),
        }
    }

    pub(crate) fn mark_closed(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(OffersError::Execution("backend is closed".into()));
        }
        Ok(())
    }

    pub(crate) async fn request_with_auth<F, Fut>(
        &self,
        method: HttpMethod,
        url: &str,
        params: RequestParams,
        execute: F,
    ) -> Result<BackendResponse>
    where
        F: Fn(HttpMethod, String, RequestParams) -> Fut + Send + Sync,
        Fut: Future<Output = Result<BackendResponse>> + Send,
    {
        self.ensure_open()?;
        self.retry
            .execute(|| self.attempt(method, url, &params, &execute))
            .await
    }

    async fn attempt<F, Fut>(
        &self,
        method: HttpMethod,
        url: &str,
        params: &RequestParams,
        execute: &F,
    ) -> Result<BackendResponse>
    where
        F: Fn(HttpMethod, String, RequestParams) -> Fut + Send + Sync,
        Fut: Future<Output = Result<BackendResponse>> + Send,
    {
        let token = self.auth.access_token(TOKEN_LIFETIME, false).await?;

        let mut params = params.clone();
        for hook in &self.hooks {
            hook.on_request(method, url, &mut params)
                .await
                .map_err(|hook_error| OffersError::Hook {
                    name: hook.name().to_string(),
                    message: hook_error.to_string(),
                })?;
        }

        let mut authed = params.clone();
        authed.headers.insert("Bearer".to_string(), token);

        let response = execute(method, url.to_string(), authed).await?;

        if response.status_code() == 401 && response.text().contains(TOKEN_EXPIRED_MARKER) {
            let new_token = self.auth.access_token(TOKEN_LIFETIME, true).await?;
            debug!("retrying request with refreshed access token");

            let mut authed = params.clone();
            authed.headers.insert("Bearer".to_string(), new_token);
            return execute(method, url.to_string(), authed).await;
        }

        Ok(response)
    }
}
