//! The request executor shared by every API surface.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{OffersError, Result};
use crate::http::{error_for_status, BackendResponse, HttpBackend, HttpMethod, RequestParams};
use crate::plugins::SharedPluginSet;

/// Builds full URLs, drives the plugin pipeline, delegates to the transport,
/// and classifies the response status.
pub(crate) struct BaseApi {
    backend: Arc<dyn HttpBackend>,
    base_url: String,
    plugins: SharedPluginSet,
}

impl BaseApi {
    pub(crate) fn new(
        backend: Arc<dyn HttpBackend>,
        base_url: String,
        plugins: SharedPluginSet,
    ) -> Self {
        Self {
            backend,
            base_url,
            plugins,
        }
    }

    pub(crate) async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        mut params: RequestParams,
    ) -> Result<BackendResponse> {
        let full_url = format!("{}{}", self.base_url, path);
        debug!(%method, url = %full_url, ?params, "dispatching API request");

        let (request_plugins, response_plugins) = self.plugins.read().unwrap().snapshot();

        for plugin in &request_plugins {
            plugin
                .process_request(method, &full_url, &mut params)
                .await
                .map_err(|plugin_error| OffersError::Plugin {
                    name: plugin.name().to_string(),
                    message: plugin_error.to_string(),
                })?;
        }

        let response = self.backend.request(method, &full_url, params).await?;

        for plugin in &response_plugins {
            plugin
                .process_response(&response)
                .await
                .map_err(|plugin_error| OffersError::Plugin {
                    name: plugin.name().to_string(),
                    message: plugin_error.to_string(),
                })?;
        }

        if let Err(api_error) = error_for_status(&response) {
            warn!(%method, url = %full_url, error = %api_error, "API request failed");
            return Err(api_error);
        }

        Ok(response)
    }
}
