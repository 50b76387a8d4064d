//! Convenience re-exports for common use.

pub use crate::api::{OffersApi, ProductsApi};
pub use crate::auth::{AuthClient, FileCachedAuthClient, TokenProvider};
pub use crate::client::{with_client, ClientOptions, OffersClient};
pub use crate::config::{ConfigOverrides, SdkConfig};
pub use crate::error::{OffersError, Result};
pub use crate::http::{BackendKind, BackendResponse, HttpBackend, HttpMethod, RequestHook, RequestParams};
pub use crate::models::{Offer, Product};
pub use crate::plugins::{Plugin, RequestPlugin, ResponsePlugin};
pub use crate::sync::SyncOffersClient;
