//! Lower-level backend on a plain `hyper` client.
//!
//! `hyper` has no per-request deadline of its own, so the exchange is wrapped
//! in the shared timeout helper.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hyper::client::HttpConnector;
use hyper_rustls::HttpsConnector;

use crate::auth::TokenProvider;
use crate::error::{OffersError, Result};
use crate::http::base::BaseTransport;
use crate::http::hooks::RequestHook;
use crate::http::{BackendResponse, HttpBackend, HttpMethod, RequestParams, DEFAULT_REQUEST_TIMEOUT};
use crate::util::timeout::with_timeout;

use super::hyper_method;

pub struct HyperBackend {
    base: BaseTransport,
    client: hyper::Client<HttpsConnector<HttpConnector>, hyper::Body>,
    timeout: Duration,
}

impl HyperBackend {
    pub fn new(auth: Arc<dyn TokenProvider>, hooks: Vec<Arc<dyn RequestHook>>) -> Self {
        Self::with_timeout(auth, hooks, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(
        auth: Arc<dyn TokenProvider>,
        hooks: Vec<Arc<dyn RequestHook>>,
        timeout: Duration,
    ) -> Self {
        let https = hyper_rustls::HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();
        let client = hyper::Client::builder().build::<_, hyper::Body>(https);

        Self {
            base: BaseTransport::new(auth, hooks),
            client,
            timeout,
        }
    }
}

#[async_trait]
impl HttpBackend for HyperBackend {
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        params: RequestParams,
    ) -> Result<BackendResponse> {
        let client = self.client.clone();
        let timeout = self.timeout;
        self.base
            .request_with_auth(method, url, params, move |method, url, params| {
                let client = client.clone();
                async move {
                    let mut builder = hyper::Request::builder()
                        .method(hyper_method(method))
                        .uri(url.as_str());
                    for (name, value) in &params.headers {
                        builder = builder.header(name.as_str(), value.as_str());
                    }

                    let body = match &params.json {
                        Some(json) => {
                            builder = builder.header("content-type", "application/json");
                            let payload = serde_json::to_vec(json).map_err(|e| {
                                OffersError::Execution(format!(
                                    "serializing request body failed: {e}"
                                ))
                            })?;
                            hyper::Body::from(payload)
                        }
                        None => hyper::Body::empty(),
                    };

                    let request = builder.body(body).map_err(|e| {
                        OffersError::Execution(format!("building hyper request failed: {e}"))
                    })?;

                    with_timeout(timeout, async move {
                        let response = client.request(request).await.map_err(|e| {
                            OffersError::Execution(format!("hyper request failed: {e}"))
                        })?;

                        let status = response.status().as_u16();
                        let bytes =
                            hyper::body::to_bytes(response.into_body()).await.map_err(|e| {
                                OffersError::Execution(format!(
                                    "reading response body failed: {e}"
                                ))
                            })?;

                        Ok(BackendResponse::new(
                            status,
                            String::from_utf8_lossy(&bytes).into_owned(),
                        ))
                    })
                    .await
                }
            })
            .await
    }

    async fn close(&self) -> Result<()> {
        self.base.mark_closed();
        Ok(())
    }
}
