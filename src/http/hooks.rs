//! Low-level request hooks run by the transport before each HTTP call.
//!
//! Hooks are distinct from the API-surface plugins: they operate on the raw
//! method/URL/params at the transport layer and may mutate the params.

use async_trait::async_trait;

use crate::error::BoxError;

use super::{HttpMethod, RequestParams};

/// Caller-supplied hook observing or mutating a request at the transport
/// layer. A hook failure aborts the call with an error naming the hook.
#[async_trait]
pub trait RequestHook: Send + Sync {
    /// Name used in error messages and logs.
    fn name(&self) -> &str;

    async fn on_request(
        &self,
        method: HttpMethod,
        url: &str,
        params: &mut RequestParams,
    ) -> Result<(), BoxError>;
}
