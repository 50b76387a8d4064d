//! Offers retrieval surface with its per-product TTL cache.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use tracing::debug;
use uuid::Uuid;

use crate::error::{OffersError, Result};
use crate::http::{HttpBackend, HttpMethod, RequestParams};
use crate::models::Offer;
use crate::plugins::SharedPluginSet;

use super::base::BaseApi;
use super::offers_endpoint;

pub struct OffersApi {
    base: BaseApi,
    ttl: Duration,
    cache: RwLock<HashMap<Uuid, (Vec<Offer>, Instant)>>,
}

impl OffersApi {
    pub(crate) fn new(
        backend: Arc<dyn HttpBackend>,
        base_url: String,
        plugins: SharedPluginSet,
        ttl: Duration,
    ) -> Self {
        Self {
            base: BaseApi::new(backend, base_url, plugins),
            ttl,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Retrieve offers for a product.
    ///
    /// A live cache entry is returned with no network call; an expired entry
    /// is evicted lazily before fetching. A fetched listing that contains
    /// any invalid element fails the whole call, with no partial results.
    pub async fn get_offers(&self, product_id: Uuid) -> Result<Vec<Offer>> {
        {
            let cache = self.cache.read().unwrap();
            if let Some((offers, stored_at)) = cache.get(&product_id) {
                if stored_at.elapsed() < self.ttl {
                    debug!(%product_id, "returning cached offers");
                    return Ok(offers.clone());
                }
            }
        }

        if self.cache.write().unwrap().remove(&product_id).is_some() {
            debug!(%product_id, "cache expired");
        }

        debug!(%product_id, "fetching offers");
        let response = self
            .base
            .request(
                HttpMethod::Get,
                &offers_endpoint(product_id),
                RequestParams::default(),
            )
            .await?;

        debug!(status = response.status_code(), "offers response");

        let payload = response.json().ok_or_else(|| {
            OffersError::InvalidResponse("invalid offer data in response: body is not JSON".into())
        })?;
        let offers: Vec<Offer> = serde_json::from_value(payload).map_err(|e| {
            OffersError::InvalidResponse(format!("invalid offer data in response: {e}"))
        })?;

        debug!(count = offers.len(), "parsed offers");
        self.cache
            .write()
            .unwrap()
            .insert(product_id, (offers.clone(), Instant::now()));
        Ok(offers)
    }
}
