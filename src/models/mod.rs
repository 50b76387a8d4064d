//! Data records exchanged with the Offers service.

pub mod auth;
pub mod offer;
pub mod product;

pub use auth::AuthTokenResponse;
pub use offer::Offer;
pub use product::Product;
