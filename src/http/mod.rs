//! Transport layer: backend contract, request hooks, and the shared
//! authenticated-request state machine.

pub mod backends;
pub mod base;
pub mod hooks;

pub use backends::{BlockingBackend, HyperBackend, ReqwestBackend};
pub use hooks::RequestHook;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use strum::{Display, EnumString};
use tracing::debug;

use crate::error::{OffersError, Result};

/// Default per-request HTTP timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP method vocabulary shared by every backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// Identifier of an interchangeable HTTP backend implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum BackendKind {
    Reqwest,
    Hyper,
    Blocking,
}

/// Mutable request parameters passed through hooks and plugins before the
/// HTTP call is issued.
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    pub headers: HashMap<String, String>,
    pub json: Option<serde_json::Value>,
}

impl RequestParams {
    pub fn with_json(mut self, json: serde_json::Value) -> Self {
        self.json = Some(json);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Uniform response shape surfaced by every backend.
///
/// Carries the full body alongside the status code; JSON is parsed lazily
/// and an unparseable body is simply "no JSON payload", not an error.
#[derive(Debug, Clone)]
pub struct BackendResponse {
    status: u16,
    body: String,
}

impl BackendResponse {
    pub fn new(status: u16, body: String) -> Self {
        Self { status, body }
    }

    pub fn status_code(&self) -> u16 {
        self.status
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.body).ok()
    }
}

/// Contract satisfied by every HTTP backend.
///
/// `request` performs one authenticated call including the 401-refresh dance
/// and bounded retry; `close` releases pooled connections, after which
/// further requests fail with a transport error.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        params: RequestParams,
    ) -> Result<BackendResponse>;

    async fn close(&self) -> Result<()>;
}

/// Classify a response status code, raising the typed failure for anything
/// outside 2xx/3xx. The raw body text is preserved in the error message.
pub fn error_for_status(response: &BackendResponse) -> Result<()> {
    let status = response.status_code();
    let text = response.text();
    debug!(status, body = text, "response status");

    if (200..400).contains(&status) {
        return Ok(());
    }

    Err(match status {
        401 => OffersError::Authentication(text.to_string()),
        404 => OffersError::NotFound(text.to_string()),
        408 => OffersError::Timeout(text.to_string()),
        409 => OffersError::Conflict(text.to_string()),
        429 => OffersError::RateLimited(text.to_string()),
        status if status >= 500 => OffersError::Server {
            status,
            message: text.to_string(),
        },
        status => OffersError::Api {
            status,
            message: text.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_kind_parses_supported_identifiers() {
        assert_eq!("reqwest".parse::<BackendKind>().unwrap(), BackendKind::Reqwest);
        assert_eq!("hyper".parse::<BackendKind>().unwrap(), BackendKind::Hyper);
        assert_eq!(
            "blocking".parse::<BackendKind>().unwrap(),
            BackendKind::Blocking,
        );
        assert!("curl".parse::<BackendKind>().is_err());
    }

    #[test]
    fn http_method_displays_upper_case() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }

    #[test]
    fn response_json_is_none_for_non_json_body() {
        let response = BackendResponse::new(200, "<html>not json</html>".to_string());
        assert!(response.json().is_none());
    }

    #[test]
    fn response_json_parses_lazily() {
        let response = BackendResponse::new(200, r#"{"ok": true}"#.to_string());
        assert_eq!(response.json().unwrap()["ok"], serde_json::json!(true));
    }
}
