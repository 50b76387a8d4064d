#![allow(dead_code)]

//! Shared test helpers: canned plugins, hooks, and token providers.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use offers_sdk::auth::TokenProvider;
use offers_sdk::error::{BoxError, Result};
use offers_sdk::http::{BackendResponse, HttpMethod, RequestParams};
use offers_sdk::http::RequestHook;
use offers_sdk::plugins::{RequestPlugin, ResponsePlugin};

/// Mount a POST /auth mock answering with the given access token.
pub async fn mount_auth(server: &MockServer, token: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "access_token": token })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Mount a POST /auth mock with no call-count expectation, for tests whose
/// concurrent calls may race on token acquisition.
pub async fn mount_auth_any(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "access_token": token })))
        .mount(server)
        .await;
}

/// Token provider answering with a fixed token, counting every acquisition.
pub struct StaticTokenProvider {
    token: String,
    calls: AtomicU32,
}

impl StaticTokenProvider {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self, _lifetime: Duration, _force_refresh: bool) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.token.clone())
    }
}

/// Request plugin recording the URLs it saw and optionally injecting a
/// header.
pub struct RecordingPlugin {
    name: String,
    header: Option<(String, String)>,
    pub seen: Mutex<Vec<String>>,
}

impl RecordingPlugin {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            header: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn with_header(name: &str, header_name: &str, header_value: &str) -> Self {
        Self {
            name: name.to_string(),
            header: Some((header_name.to_string(), header_value.to_string())),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen_count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl RequestPlugin for RecordingPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    async fn process_request(
        &self,
        _method: HttpMethod,
        url: &str,
        params: &mut RequestParams,
    ) -> std::result::Result<(), BoxError> {
        self.seen.lock().unwrap().push(format!("{}:{url}", self.name));
        if let Some((name, value)) = &self.header {
            params.headers.insert(name.clone(), value.clone());
        }
        Ok(())
    }
}

/// Request plugin appending its name to a log shared across plugins, for
/// asserting execution order.
pub struct OrderedPlugin {
    name: String,
    log: Arc<Mutex<Vec<String>>>,
}

impl OrderedPlugin {
    pub fn new(name: &str, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            name: name.to_string(),
            log,
        }
    }
}

#[async_trait]
impl RequestPlugin for OrderedPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    async fn process_request(
        &self,
        _method: HttpMethod,
        _url: &str,
        _params: &mut RequestParams,
    ) -> std::result::Result<(), BoxError> {
        self.log.lock().unwrap().push(self.name.clone());
        Ok(())
    }
}

/// Request plugin that always fails.
pub struct FailingRequestPlugin;

#[async_trait]
impl RequestPlugin for FailingRequestPlugin {
    fn name(&self) -> &str {
        "failing-request"
    }

    async fn process_request(
        &self,
        _method: HttpMethod,
        _url: &str,
        _params: &mut RequestParams,
    ) -> std::result::Result<(), BoxError> {
        Err("request plugin exploded".into())
    }
}

/// Response plugin that always fails.
pub struct FailingResponsePlugin;

#[async_trait]
impl ResponsePlugin for FailingResponsePlugin {
    fn name(&self) -> &str {
        "failing-response"
    }

    async fn process_response(
        &self,
        _response: &BackendResponse,
    ) -> std::result::Result<(), BoxError> {
        Err("response plugin exploded".into())
    }
}

/// Transport hook injecting a header into the raw request params.
pub struct HeaderHook;

#[async_trait]
impl RequestHook for HeaderHook {
    fn name(&self) -> &str {
        "header-hook"
    }

    async fn on_request(
        &self,
        _method: HttpMethod,
        _url: &str,
        params: &mut RequestParams,
    ) -> std::result::Result<(), BoxError> {
        params.headers.insert("x-hook".to_string(), "1".to_string());
        Ok(())
    }
}

/// Transport hook that always fails.
pub struct FailingHook;

#[async_trait]
impl RequestHook for FailingHook {
    fn name(&self) -> &str {
        "failing-hook"
    }

    async fn on_request(
        &self,
        _method: HttpMethod,
        _url: &str,
        _params: &mut RequestParams,
    ) -> std::result::Result<(), BoxError> {
        Err("hook exploded".into())
    }
}
