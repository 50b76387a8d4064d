//! Async Rust client SDK for the Offers service.
//!
//! Registers products and retrieves time-limited offer listings over HTTP,
//! authenticating every call with a bearer access token obtained from a
//! long-lived refresh token. Requests run through a pluggable middleware
//! pipeline and one of three interchangeable HTTP backends with bounded
//! retry and 401-triggered re-authentication.
//!
//! # Quick Start
//!
//! ```no_run
//! use offers_sdk::prelude::*;
//! use uuid::Uuid;
//!
//! # async fn example() -> offers_sdk::error::Result<()> {
//! let client = OffersClient::new(
//!     ClientOptions::builder()
//!         .base_url("https://api.example.com".to_string())
//!         .refresh_token("refresh-token".to_string())
//!         .build(),
//! )?;
//!
//! let product = Product::new(Some(Uuid::new_v4()), "Widget", "A fine widget");
//! client.products.register_product(&product).await?;
//! let offers = client.offers.get_offers(product.id.unwrap()).await?;
//! println!("{} offers", offers.len());
//! client.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod plugins;
pub mod prelude;
pub mod sync;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;

pub use client::{ClientOptions, OffersClient};
