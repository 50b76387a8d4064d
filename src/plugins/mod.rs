//! Request/response plugins run at the API-surface layer.
//!
//! Plugins are the higher-level counterpart of the transport's request
//! hooks: they run around every executor call, in registration order, and a
//! failing plugin aborts the call with an error naming it.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::BoxError;
use crate::http::{BackendResponse, HttpMethod, RequestParams};

/// Observes or mutates a request before it reaches the transport.
#[async_trait]
pub trait RequestPlugin: Send + Sync {
    /// Name used in error messages and logs.
    fn name(&self) -> &str;

    async fn process_request(
        &self,
        method: HttpMethod,
        url: &str,
        params: &mut RequestParams,
    ) -> Result<(), BoxError>;
}

/// Observes a response after it was received.
#[async_trait]
pub trait ResponsePlugin: Send + Sync {
    /// Name used in error messages and logs.
    fn name(&self) -> &str;

    async fn process_response(&self, response: &BackendResponse) -> Result<(), BoxError>;
}

/// A plugin registration: either side of the pipeline.
#[derive(Clone)]
pub enum Plugin {
    Request(Arc<dyn RequestPlugin>),
    Response(Arc<dyn ResponsePlugin>),
}

impl Plugin {
    pub fn request(plugin: Arc<dyn RequestPlugin>) -> Self {
        Self::Request(plugin)
    }

    pub fn response(plugin: Arc<dyn ResponsePlugin>) -> Self {
        Self::Response(plugin)
    }
}

/// Ordered plugin lists shared read-only by every API surface of a client.
///
/// Registration deduplicates by identity, so registering the same `Arc`
/// twice is a no-op.
#[derive(Default)]
pub struct PluginSet {
    request: Vec<Arc<dyn RequestPlugin>>,
    response: Vec<Arc<dyn ResponsePlugin>>,
}

impl PluginSet {
    pub fn register(&mut self, plugin: Plugin) {
        match plugin {
            Plugin::Request(plugin) => {
                if !self.request.iter().any(|p| Arc::ptr_eq(p, &plugin)) {
                    self.request.push(plugin);
                }
            }
            Plugin::Response(plugin) => {
                if !self.response.iter().any(|p| Arc::ptr_eq(p, &plugin)) {
                    self.response.push(plugin);
                }
            }
        }
    }

    /// Cheap clone of both lists, taken once per call so a registration
    /// mid-session affects only calls issued after it.
    pub fn snapshot(&self) -> (Vec<Arc<dyn RequestPlugin>>, Vec<Arc<dyn ResponsePlugin>>) {
        (self.request.clone(), self.response.clone())
    }

    pub fn request_len(&self) -> usize {
        self.request.len()
    }

    pub fn response_len(&self) -> usize {
        self.response.len()
    }
}

/// The plugin set as shared by the facade and its API surfaces.
pub type SharedPluginSet = Arc<RwLock<PluginSet>>;

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    #[async_trait]
    impl RequestPlugin for Noop {
        fn name(&self) -> &str {
            "noop"
        }

        async fn process_request(
            &self,
            _method: HttpMethod,
            _url: &str,
            _params: &mut RequestParams,
        ) -> Result<(), BoxError> {
            Ok(())
        }
    }

    #[test]
    fn registration_deduplicates_by_identity() {
        let plugin: Arc<dyn RequestPlugin> = Arc::new(Noop);
        let mut set = PluginSet::default();

        set.register(Plugin::request(plugin.clone()));
        set.register(Plugin::request(plugin.clone()));
        assert_eq!(set.request_len(), 1);

        // A distinct instance of the same type is a different identity.
        set.register(Plugin::request(Arc::new(Noop)));
        assert_eq!(set.request_len(), 2);
    }
}
