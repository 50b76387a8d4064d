//! Blocking-client backend handed off to the worker-thread pool.
//!
//! Presents the same suspend/resume contract as the async backends by
//! running each `reqwest::blocking` call inside `spawn_blocking`. The
//! blocking client itself is built lazily on a worker thread, never on an
//! async one.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::auth::TokenProvider;
use crate::error::{OffersError, Result};
use crate::http::base::BaseTransport;
use crate::http::hooks::RequestHook;
use crate::http::{BackendResponse, HttpBackend, HttpMethod, RequestParams, DEFAULT_REQUEST_TIMEOUT};

use super::reqwest_method;

pub struct BlockingBackend {
    base: BaseTransport,
    client_cell: Arc<OnceLock<reqwest::blocking::Client>>,
    timeout: Duration,
}

impl BlockingBackend {
    pub fn new(auth: Arc<dyn TokenProvider>, hooks: Vec<Arc<dyn RequestHook>>) -> Self {
        Self::with_timeout(auth, hooks, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(
        auth: Arc<dyn TokenProvider>,
        hooks: Vec<Arc<dyn RequestHook>>,
        timeout: Duration,
    ) -> Self {
        Self {
            base: BaseTransport::new(auth, hooks),
            client_cell: Arc::new(OnceLock::new()),
            timeout,
        }
    }
}

fn blocking_client(
    cell: &OnceLock<reqwest::blocking::Client>,
    timeout: Duration,
) -> Result<reqwest::blocking::Client> {
    if let Some(client) = cell.get() {
        return Ok(client.clone());
    }
    let built = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| OffersError::Config(format!("failed to build blocking client: {e}")))?;
    let _ = cell.set(built.clone());
    Ok(cell.get().cloned().unwrap_or(built))
}

#[async_trait]
impl HttpBackend for BlockingBackend {
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        params: RequestParams,
    ) -> Result<BackendResponse> {
        let client_cell = self.client_cell.clone();
        let timeout = self.timeout;
        self.base
            .request_with_auth(method, url, params, move |method, url, params| {
                let client_cell = client_cell.clone();
                async move {
                    let handle = tokio::task::spawn_blocking(move || -> Result<BackendResponse> {
                        let client = blocking_client(&client_cell, timeout)?;
                        let mut request = client.request(reqwest_method(method), &url);
                        for (name, value) in &params.headers {
                            request = request.header(name.as_str(), value.as_str());
                        }
                        if let Some(json) = &params.json {
                            request = request.json(json);
                        }

                        let response = request.send().map_err(|e| {
                            OffersError::Execution(format!("blocking request failed: {e}"))
                        })?;

                        let status = response.status().as_u16();
                        let body = response.text().map_err(|e| {
                            OffersError::Execution(format!("reading response body failed: {e}"))
                        })?;

                        Ok(BackendResponse::new(status, body))
                    });

                    match handle.await {
                        Ok(result) => result,
                        Err(join_error) => Err(OffersError::Execution(format!(
                            "blocking worker failed: {join_error}"
                        ))),
                    }
                }
            })
            .await
    }

    async fn close(&self) -> Result<()> {
        self.base.mark_closed();
        Ok(())
    }
}
