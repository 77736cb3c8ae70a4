//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::content::ContentClient;
use crate::shopify::StorefrontClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the upstream API clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    storefront: StorefrontClient,
    content: ContentClient,
}

impl AppState {
    /// Create application state with clients built from configuration.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let storefront = StorefrontClient::new(&config.shopify);
        let content = ContentClient::new(&config.content);
        Self::with_clients(config, storefront, content)
    }

    /// Create application state with explicit clients.
    ///
    /// Used by tests to inject clients pointed at mock servers.
    #[must_use]
    pub fn with_clients(
        config: StorefrontConfig,
        storefront: StorefrontClient,
        content: ContentClient,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                storefront,
                content,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the Shopify Storefront API client.
    #[must_use]
    pub fn storefront(&self) -> &StorefrontClient {
        &self.inner.storefront
    }

    /// Get a reference to the CMS content client.
    #[must_use]
    pub fn content(&self) -> &ContentClient {
        &self.inner.content
    }
}
