use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An offer for a registered product.
///
/// Constructed only by deserializing server JSON; a missing or ill-typed
/// field fails the whole parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub id: Uuid,
    /// Price in cents.
    pub price: u64,
    pub items_in_stock: u64,
}
