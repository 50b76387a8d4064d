use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{OffersError, Result};

/// A product to register with the Offers service.
///
/// The `id` is assigned by the caller, not the server, in this protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub description: String,
}

impl Product {
    pub fn new(id: Option<Uuid>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }

    /// Caller-side validation run before a registration request is issued.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(OffersError::InvalidArgument(
                "product name must not be empty".into(),
            ));
        }
        if self.description.trim().is_empty() {
            return Err(OffersError::InvalidArgument(
                "product description must not be empty".into(),
            ));
        }
        Ok(())
    }
}
