//! Client facade composing auth, transport, plugins, and the API surfaces.

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use bon::Builder;

use crate::api::{OffersApi, ProductsApi};
use crate::auth::{AuthClient, FileCachedAuthClient, TokenProvider};
use crate::config::{ConfigOverrides, SdkConfig};
use crate::error::Result;
use crate::http::{
    BackendKind, BlockingBackend, HttpBackend, HyperBackend, ReqwestBackend, RequestHook,
    DEFAULT_REQUEST_TIMEOUT,
};
use crate::plugins::{Plugin, PluginSet, SharedPluginSet};

/// Construction options for [`OffersClient`].
///
/// Unset values fall back to the layered configuration sources (environment,
/// YAML file, defaults).
#[derive(Builder, Default)]
pub struct ClientOptions {
    pub refresh_token: Option<String>,
    pub base_url: Option<String>,
    pub backend: Option<String>,
    pub config_path: Option<PathBuf>,
    pub cache_ttl_seconds: Option<u64>,
    pub request_timeout: Option<Duration>,
    #[builder(default)]
    pub plugins: Vec<Plugin>,
    #[builder(default)]
    pub request_hooks: Vec<Arc<dyn RequestHook>>,
    /// Persist access tokens to this file between runs.
    pub token_cache_path: Option<PathBuf>,
    /// Fully replace the token provider, e.g. with a custom decorator.
    pub token_provider: Option<Arc<dyn TokenProvider>>,
}

/// Main entry point for the Offers SDK.
///
/// Composes the token provider, one selected HTTP backend, and the products
/// and offers API surfaces, which share the backend instance and one plugin
/// registration set.
pub struct OffersClient {
    config: SdkConfig,
    backend: Arc<dyn HttpBackend>,
    plugins: SharedPluginSet,
    pub products: ProductsApi,
    pub offers: OffersApi,
}

impl OffersClient {
    pub fn new(options: ClientOptions) -> Result<Self> {
        let config = SdkConfig::resolve(ConfigOverrides {
            api_base_url: options.base_url,
            refresh_token: options.refresh_token,
            backend: options.backend,
            config_path: options.config_path,
            ttl_seconds: options.cache_ttl_seconds,
        })?;

        let token_provider: Arc<dyn TokenProvider> = match options.token_provider {
            Some(provider) => provider,
            None => {
                let auth = AuthClient::new(
                    Some(config.refresh_token.clone()),
                    Some(config.api_base_url.clone()),
                );
                match options.token_cache_path {
                    Some(path) => Arc::new(FileCachedAuthClient::new(auth, path)),
                    None => Arc::new(auth),
                }
            }
        };

        let timeout = options.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        let hooks = options.request_hooks;
        let backend: Arc<dyn HttpBackend> = match config.backend {
            BackendKind::Reqwest => Arc::new(ReqwestBackend::with_timeout(
                token_provider.clone(),
                hooks,
                timeout,
            )?),
            BackendKind::Hyper => Arc::new(HyperBackend::with_timeout(
                token_provider.clone(),
                hooks,
                timeout,
            )),
            BackendKind::Blocking => Arc::new(BlockingBackend::with_timeout(
                token_provider.clone(),
                hooks,
                timeout,
            )),
        };

        let plugins: SharedPluginSet = Arc::new(RwLock::new(PluginSet::default()));
        let products = ProductsApi::new(
            backend.clone(),
            config.api_base_url.clone(),
            plugins.clone(),
        );
        let offers = OffersApi::new(
            backend.clone(),
            config.api_base_url.clone(),
            plugins.clone(),
            Duration::from_secs(config.ttl_seconds),
        );

        let client = Self {
            config,
            backend,
            plugins,
            products,
            offers,
        };
        client.register_plugins(options.plugins);
        Ok(client)
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Register a plugin on the shared set; both API surfaces observe it for
    /// calls issued after registration. Duplicate identities are ignored.
    pub fn register_plugin(&self, plugin: Plugin) {
        self.plugins.write().unwrap().register(plugin);
    }

    pub fn register_plugins(&self, plugins: impl IntoIterator<Item = Plugin>) {
        let mut set = self.plugins.write().unwrap();
        for plugin in plugins {
            set.register(plugin);
        }
    }

    /// Release the transport's resources; requests issued afterwards fail.
    pub async fn close(&self) -> Result<()> {
        self.backend.close().await
    }
}

impl fmt::Debug for OffersClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OffersClient")
            .field("base_url", &self.config.api_base_url)
            .field("backend", &self.config.backend)
            .finish()
    }
}

/// Run `f` against a freshly built client, closing it on every non-panic
/// exit path.
pub async fn with_client<F, Fut, T>(options: ClientOptions, run: F) -> Result<T>
where
    F: FnOnce(Arc<OffersClient>) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let client = Arc::new(OffersClient::new(options)?);
    let result = run(Arc::clone(&client)).await;
    let close_result = client.close().await;
    match result {
        Ok(value) => close_result.map(|()| value),
        Err(err) => Err(err),
    }
}
