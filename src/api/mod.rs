//! API surfaces: the shared request executor plus the products and offers
//! endpoints.

pub mod base;
pub mod offers;
pub mod products;

pub use offers::OffersApi;
pub use products::ProductsApi;

use uuid::Uuid;

pub const PRODUCTS_ENDPOINT: &str = "/products/register";

pub(crate) fn offers_endpoint(product_id: Uuid) -> String {
    format!("/products/{product_id}/offers")
}
