//! Blocking facade over the async client.
//!
//! Owns a dedicated current-thread tokio runtime and blocks the calling
//! thread until each operation completes; business logic lives entirely in
//! the async core.

use tokio::runtime::{Builder, Runtime};
use uuid::Uuid;

use crate::client::{ClientOptions, OffersClient};
use crate::error::{OffersError, Result};
use crate::models::{Offer, Product};
use crate::plugins::Plugin;

pub struct SyncOffersClient {
    runtime: Runtime,
    client: OffersClient,
    closed: bool,
}

impl SyncOffersClient {
    pub fn new(options: ClientOptions) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| OffersError::Config(format!("failed to build sync runtime: {e}")))?;
        let client = OffersClient::new(options)?;

        Ok(Self {
            runtime,
            client,
            closed: false,
        })
    }

    pub fn register_product(&self, product: &Product) -> Result<serde_json::Value> {
        self.runtime
            .block_on(self.client.products.register_product(product))
    }

    pub fn register_products(&self, products: &[Product]) -> Vec<serde_json::Value> {
        self.runtime
            .block_on(self.client.products.register_products(products))
    }

    pub fn get_offers(&self, product_id: Uuid) -> Result<Vec<Offer>> {
        self.runtime.block_on(self.client.offers.get_offers(product_id))
    }

    pub fn register_plugin(&self, plugin: Plugin) {
        self.client.register_plugin(plugin);
    }

    /// Close the underlying transport. Called automatically on drop if the
    /// caller did not.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.runtime.block_on(self.client.close())
    }
}

impl Drop for SyncOffersClient {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
