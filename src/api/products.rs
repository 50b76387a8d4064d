//! Product registration surface.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, error, warn};

use crate::error::{OffersError, Result};
use crate::http::{HttpBackend, HttpMethod, RequestParams};
use crate::models::Product;
use crate::plugins::SharedPluginSet;

use super::base::BaseApi;
use super::PRODUCTS_ENDPOINT;

pub struct ProductsApi {
    base: BaseApi,
}

impl ProductsApi {
    pub(crate) fn new(
        backend: Arc<dyn HttpBackend>,
        base_url: String,
        plugins: SharedPluginSet,
    ) -> Self {
        Self {
            base: BaseApi::new(backend, base_url, plugins),
        }
    }

    /// Register a new product, returning the server's JSON response as-is.
    pub async fn register_product(&self, product: &Product) -> Result<serde_json::Value> {
        product.validate()?;

        let payload = serde_json::to_value(product)
            .map_err(|e| OffersError::InvalidArgument(format!("unserializable product: {e}")))?;

        let response = self
            .base
            .request(
                HttpMethod::Post,
                PRODUCTS_ENDPOINT,
                RequestParams::default().with_json(payload),
            )
            .await?;

        debug!(status = response.status_code(), "product registration response");

        response.json().ok_or_else(|| {
            OffersError::InvalidResponse("invalid JSON in register_product response".into())
        })
    }

    /// Register multiple products concurrently.
    ///
    /// Per-item failures are logged and excluded; the call itself never
    /// fails solely because some items failed. Returns only the successes.
    pub async fn register_products(&self, products: &[Product]) -> Vec<serde_json::Value> {
        let results = join_all(
            products
                .iter()
                .map(|product| self.register_product(product)),
        )
        .await;

        let mut registered = Vec::new();
        for (index, result) in results.into_iter().enumerate() {
            match result {
                Ok(value) => registered.push(value),
                Err(err @ OffersError::InvalidArgument(_)) => {
                    warn!(index, error = %err, "validation failed for product");
                }
                Err(err) => {
                    error!(index, error = %err, "registration failed for product");
                }
            }
        }
        registered
    }
}
