//! Default backend: pooled async `reqwest` client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::auth::TokenProvider;
use crate::error::{OffersError, Result};
use crate::http::base::BaseTransport;
use crate::http::hooks::RequestHook;
use crate::http::{BackendResponse, HttpBackend, HttpMethod, RequestParams, DEFAULT_REQUEST_TIMEOUT};

use super::reqwest_method;

pub struct ReqwestBackend {
    base: BaseTransport,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(auth: Arc<dyn TokenProvider>, hooks: Vec<Arc<dyn RequestHook>>) -> Result<Self> {
        Self::with_timeout(auth, hooks, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(
        auth: Arc<dyn TokenProvider>,
        hooks: Vec<Arc<dyn RequestHook>>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| OffersError::Config(format!("failed to build reqwest client: {e}")))?;

        Ok(Self {
            base: BaseTransport::new(auth, hooks),
            client,
        })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        params: RequestParams,
    ) -> Result<BackendResponse> {
        let client = self.client.clone();
        self.base
            .request_with_auth(method, url, params, move |method, url, params| {
                let client = client.clone();
                async move {
                    let mut request = client.request(reqwest_method(method), &url);
                    for (name, value) in &params.headers {
                        request = request.header(name.as_str(), value.as_str());
                    }
                    if let Some(json) = &params.json {
                        request = request.json(json);
                    }

                    let response = request.send().await.map_err(|e| {
                        OffersError::Execution(format!("reqwest request failed: {e}"))
                    })?;

                    let status = response.status().as_u16();
                    let body = response.text().await.map_err(|e| {
                        OffersError::Execution(format!("reading response body failed: {e}"))
                    })?;

                    Ok(BackendResponse::new(status, body))
                }
            })
            .await
    }

    async fn close(&self) -> Result<()> {
        // Pooled connections are released when the client is dropped; the
        // closed flag rejects any request issued after close.
        self.base.mark_closed();
        Ok(())
    }
}
