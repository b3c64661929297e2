//! # Core Configuration Module
//!
//! Provides configuration management for the OneDrive listing core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a `CoreConfig`
//! instance that holds every collaborator and setting a provider connector
//! needs. It enforces fail-fast validation so that a missing capability is
//! reported at startup rather than on the first remote call.
//!
//! ## Required Dependencies
//!
//! - `AccessTokenProvider` - Account/token management is always host-owned
//!
//! ## Optional Dependencies (with platform defaults)
//!
//! - `HttpClient` - HTTP operations (desktop default: reqwest)
//! - `CacheStore` - Short-lived item cache (desktop default: in-memory map)
//!
//! When the `desktop-shims` feature is enabled, `ReqwestHttpClient` and
//! `MemoryCacheStore` are injected automatically if not provided.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::CoreConfig;
//! use std::sync::Arc;
//!
//! let config = CoreConfig::builder()
//!     .addon_id("plugin.video.onedrive")
//!     .token_provider(Arc::new(MyAccountManager::new()))
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::{AccessTokenProvider, CacheStore, HttpClient};
use std::sync::Arc;
use std::time::Duration;

/// Microsoft Graph API base URL
pub const GRAPH_API_BASE: &str = "https://graph.microsoft.com/v1.0";

/// How long a fetched item record stays cached
pub const DEFAULT_ITEM_CACHE_TTL: Duration = Duration::from_secs(30);

/// Core configuration for the OneDrive listing core.
///
/// Use [`CoreConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// Namespace prefix for cache keys (the add-on identifier)
    pub addon_id: String,

    /// Base URL that relative API paths are resolved against
    pub api_base_url: String,

    /// Time-to-live for cached item records
    pub item_cache_ttl: Duration,

    /// Extra query parameters sent with listing and single-item requests
    pub listing_parameters: Vec<(String, String)>,

    /// HTTP client for API requests
    pub http_client: Arc<dyn HttpClient>,

    /// Expiring in-process store backing the item cache
    pub cache_store: Arc<dyn CacheStore>,

    /// Source of bearer tokens per drive
    pub token_provider: Arc<dyn AccessTokenProvider>,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field("addon_id", &self.addon_id)
            .field("api_base_url", &self.api_base_url)
            .field("item_cache_ttl", &self.item_cache_ttl)
            .field("listing_parameters", &self.listing_parameters)
            .field("http_client", &"HttpClient { ... }")
            .field("cache_store", &"CacheStore { ... }")
            .field("token_provider", &"AccessTokenProvider { ... }")
            .finish()
    }
}

impl CoreConfig {
    /// Creates a new builder for constructing a `CoreConfig`.
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - The add-on id is non-empty and has no whitespace
    /// - The API base URL is an absolute http(s) URL
    /// - The item cache TTL is non-zero
    pub fn validate(&self) -> Result<()> {
        if self.addon_id.trim().is_empty() {
            return Err(Error::Config("Add-on id cannot be empty".to_string()));
        }

        if self.addon_id.chars().any(char::is_whitespace) {
            return Err(Error::Config(format!(
                "Add-on id must not contain whitespace: '{}'",
                self.addon_id
            )));
        }

        if !(self.api_base_url.starts_with("https://") || self.api_base_url.starts_with("http://"))
        {
            return Err(Error::Config(format!(
                "API base URL must be an absolute http(s) URL: '{}'",
                self.api_base_url
            )));
        }

        if self.item_cache_ttl.is_zero() {
            return Err(Error::Config(
                "Item cache TTL must be greater than 0 seconds".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn http_client_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "HttpClient".to_string(),
        message: "No HTTP client implementation provided. \
                 Desktop: ensure the 'desktop-shims' feature is enabled to use ReqwestHttpClient. \
                 Other hosts: inject a platform-native adapter."
            .to_string(),
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn cache_store_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "CacheStore".to_string(),
        message: "No CacheStore implementation provided for the item cache. \
                 Desktop: ensure the 'desktop-shims' feature is enabled to use MemoryCacheStore. \
                 Other hosts: inject an in-memory store."
            .to_string(),
    }
}

fn token_provider_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "AccessTokenProvider".to_string(),
        message: "AccessTokenProvider is required to authorize API requests. \
                 Inject the host account manager with .token_provider()."
            .to_string(),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client() -> Result<Arc<dyn HttpClient>> {
    use bridge_desktop::ReqwestHttpClient;

    let client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::try_new()?);
    Ok(client)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client() -> Result<Arc<dyn HttpClient>> {
    Err(http_client_missing_error())
}

#[cfg(feature = "desktop-shims")]
fn provide_default_cache_store() -> Result<Arc<dyn CacheStore>> {
    use bridge_desktop::MemoryCacheStore;

    let store: Arc<dyn CacheStore> = Arc::new(MemoryCacheStore::new());
    Ok(store)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_cache_store() -> Result<Arc<dyn CacheStore>> {
    Err(cache_store_missing_error())
}

/// Builder for constructing [`CoreConfig`] instances.
///
/// Call [`build()`](CoreConfigBuilder::build) once every required value is
/// set; missing values produce actionable errors.
#[derive(Default)]
pub struct CoreConfigBuilder {
    addon_id: Option<String>,
    api_base_url: Option<String>,
    item_cache_ttl: Option<Duration>,
    listing_parameters: Option<Vec<(String, String)>>,
    http_client: Option<Arc<dyn HttpClient>>,
    cache_store: Option<Arc<dyn CacheStore>>,
    token_provider: Option<Arc<dyn AccessTokenProvider>>,
}

impl CoreConfigBuilder {
    /// Sets the add-on id used to namespace cache keys (required).
    pub fn addon_id(mut self, id: impl Into<String>) -> Self {
        self.addon_id = Some(id.into());
        self
    }

    /// Overrides the API base URL.
    ///
    /// Default: [`GRAPH_API_BASE`]. A trailing `/` is removed.
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Sets how long fetched item records stay cached.
    ///
    /// Default: 30 seconds
    pub fn item_cache_ttl(mut self, ttl: Duration) -> Self {
        self.item_cache_ttl = Some(ttl);
        self
    }

    /// Replaces the extra query parameters sent with item requests.
    ///
    /// Default: `expand=thumbnails`
    pub fn listing_parameters<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.listing_parameters = Some(
            params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Sets the HTTP client implementation.
    ///
    /// If not provided, the desktop default (reqwest-based) will be used when
    /// the `desktop-shims` feature is enabled.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the cache store backing the item cache.
    ///
    /// If not provided, an in-memory store will be used when the
    /// `desktop-shims` feature is enabled.
    pub fn cache_store(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.cache_store = Some(store);
        self
    }

    /// Sets the access token provider (required).
    pub fn token_provider(mut self, provider: Arc<dyn AccessTokenProvider>) -> Self {
        self.token_provider = Some(provider);
        self
    }

    /// Builds the final `CoreConfig` instance.
    ///
    /// # Returns
    ///
    /// Returns `Ok(CoreConfig)` on success, or an error if:
    /// - The add-on id or token provider is missing
    /// - A bridge has no implementation and no desktop default applies
    /// - Configuration values are invalid
    pub fn build(self) -> Result<CoreConfig> {
        let addon_id = self.addon_id.ok_or_else(|| {
            Error::Config("Add-on id is required. Use .addon_id() to set it.".to_string())
        })?;

        let token_provider = self.token_provider.ok_or_else(token_provider_missing_error)?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => provide_default_http_client()?,
        };

        let cache_store = match self.cache_store {
            Some(store) => store,
            None => provide_default_cache_store()?,
        };

        let api_base_url = self
            .api_base_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| GRAPH_API_BASE.to_string());

        let config = CoreConfig {
            addon_id,
            api_base_url,
            item_cache_ttl: self.item_cache_ttl.unwrap_or(DEFAULT_ITEM_CACHE_TTL),
            listing_parameters: self
                .listing_parameters
                .unwrap_or_else(|| vec![("expand".to_string(), "thumbnails".to_string())]),
            http_client,
            cache_store,
            token_provider,
        };

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::Result as BridgeResult;
    use bridge_traits::{AccessTokens, HttpRequest, HttpResponse};
    use serde_json::Value;

    struct MockTokenProvider;

    #[async_trait]
    impl AccessTokenProvider for MockTokenProvider {
        async fn access_tokens(&self, _drive_id: &str) -> BridgeResult<Option<AccessTokens>> {
            Ok(Some(AccessTokens::new("token")))
        }
    }

    struct MockHttpClient;

    #[async_trait]
    impl HttpClient for MockHttpClient {
        async fn execute(&self, _request: HttpRequest) -> BridgeResult<HttpResponse> {
            unimplemented!("not called by config tests")
        }
    }

    struct MockCacheStore;

    #[async_trait]
    impl CacheStore for MockCacheStore {
        async fn set(&self, _key: &str, _value: Value, _ttl: Duration) -> BridgeResult<()> {
            Ok(())
        }

        async fn get(&self, _key: &str) -> BridgeResult<Option<Value>> {
            Ok(None)
        }

        async fn remove(&self, _key: &str) -> BridgeResult<()> {
            Ok(())
        }

        async fn clear(&self) -> BridgeResult<()> {
            Ok(())
        }
    }

    fn complete_builder() -> CoreConfigBuilder {
        CoreConfig::builder()
            .addon_id("plugin.video.onedrive")
            .token_provider(Arc::new(MockTokenProvider))
            .http_client(Arc::new(MockHttpClient))
            .cache_store(Arc::new(MockCacheStore))
    }

    #[test]
    fn test_builder_with_all_required_fields() {
        let config = complete_builder().build().unwrap();

        assert_eq!(config.addon_id, "plugin.video.onedrive");
        assert_eq!(config.api_base_url, GRAPH_API_BASE);
        assert_eq!(config.item_cache_ttl, Duration::from_secs(30));
        assert_eq!(
            config.listing_parameters,
            vec![("expand".to_string(), "thumbnails".to_string())]
        );
    }

    #[test]
    fn test_builder_requires_addon_id() {
        let result = CoreConfig::builder()
            .token_provider(Arc::new(MockTokenProvider))
            .http_client(Arc::new(MockHttpClient))
            .cache_store(Arc::new(MockCacheStore))
            .build();

        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Add-on id is required"));
    }

    #[test]
    fn test_builder_requires_token_provider() {
        let result = CoreConfig::builder()
            .addon_id("plugin.video.onedrive")
            .http_client(Arc::new(MockHttpClient))
            .cache_store(Arc::new(MockCacheStore))
            .build();

        let err = result.unwrap_err();
        assert!(matches!(err, Error::CapabilityMissing { .. }));
        assert!(err.to_string().contains("AccessTokenProvider"));
    }

    #[cfg(not(feature = "desktop-shims"))]
    #[test]
    fn test_builder_requires_http_client_without_shims() {
        let result = CoreConfig::builder()
            .addon_id("plugin.video.onedrive")
            .token_provider(Arc::new(MockTokenProvider))
            .cache_store(Arc::new(MockCacheStore))
            .build();

        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("HttpClient"));
        assert!(err_msg.contains("desktop-shims"));
    }

    #[cfg(not(feature = "desktop-shims"))]
    #[test]
    fn test_builder_requires_cache_store_without_shims() {
        let result = CoreConfig::builder()
            .addon_id("plugin.video.onedrive")
            .token_provider(Arc::new(MockTokenProvider))
            .http_client(Arc::new(MockHttpClient))
            .build();

        assert!(result.unwrap_err().to_string().contains("CacheStore"));
    }

    #[cfg(feature = "desktop-shims")]
    #[test]
    fn test_build_with_desktop_defaults() {
        let config = CoreConfig::builder()
            .addon_id("plugin.video.onedrive")
            .token_provider(Arc::new(MockTokenProvider))
            .build()
            .expect("desktop defaults should succeed");

        assert_eq!(config.api_base_url, GRAPH_API_BASE);
    }

    #[test]
    fn test_custom_values_are_applied() {
        let config = complete_builder()
            .api_base_url("https://graph.example.test/beta/")
            .item_cache_ttl(Duration::from_secs(5))
            .listing_parameters([("expand", "thumbnails"), ("top", "200")])
            .build()
            .unwrap();

        assert_eq!(config.api_base_url, "https://graph.example.test/beta");
        assert_eq!(config.item_cache_ttl, Duration::from_secs(5));
        assert_eq!(config.listing_parameters.len(), 2);
        assert_eq!(config.listing_parameters[1], ("top".to_string(), "200".to_string()));
    }

    #[test]
    fn test_validate_rejects_blank_addon_id() {
        let result = complete_builder().addon_id("   ").build();
        assert!(result.unwrap_err().to_string().contains("cannot be empty"));

        let result = complete_builder().addon_id("my addon").build();
        assert!(result.unwrap_err().to_string().contains("whitespace"));
    }

    #[test]
    fn test_validate_rejects_relative_base_url() {
        let result = complete_builder().api_base_url("graph.microsoft.com").build();
        assert!(result.unwrap_err().to_string().contains("absolute"));
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let result = complete_builder().item_cache_ttl(Duration::ZERO).build();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("must be greater than 0"));
    }

    #[test]
    fn test_config_is_cloneable_and_debug_hides_bridges() {
        let config = complete_builder().build().unwrap();
        let cloned = config.clone();

        assert_eq!(cloned.addon_id, config.addon_id);
        let rendered = format!("{:?}", cloned);
        assert!(rendered.contains("HttpClient { ... }"));
        assert!(rendered.contains("plugin.video.onedrive"));
    }
}
