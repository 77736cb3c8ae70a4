//! Headless CMS client for editorial content.
//!
//! Marketing content (FAQs, highlights, feature bullets, description
//! sections) lives in the CMS, keyed by the product's catalog handle. The
//! client issues one combined GROQ query per product over the CMS's HTTP
//! query API and caches results for 5 minutes, matching the catalog cache.
//! Read-only: content is managed in the CMS studio, never from here.

pub mod types;

pub use types::{
    AssetRef, Faq, Feature, Highlight, ImageRef, ProductContent, ProductDescription,
    ProductFaqs, ProductFeatures, ProductHighlights,
};

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::ContentConfig;

/// Combined projection of every editorial section for one product handle.
/// Single round-trip instead of one query per section.
const PRODUCT_CONTENT_QUERY: &str = r#"{
  "faqs": *[_type == "productFAQs" && productHandle == $productHandle][0] {
    title,
    faqs[] { question, answer }
  },
  "highlights": *[_type == "productHighlights" && productHandle == $productHandle][0] {
    title,
    highlights[] { title, description, image { asset, alt } }
  },
  "features": *[_type == "productFeatures" && productHandle == $productHandle][0] {
    title,
    features[] { title, description, icon { asset, alt } }
  },
  "description": *[_type == "productDescription" && productHandle == $productHandle][0] {
    description,
    productDetails,
    returnsAndRefunds,
    careInstructions
  }
}"#;

/// Errors that can occur when fetching CMS content.
#[derive(Debug, Error)]
pub enum ContentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The CMS answered with a non-success status.
    #[error("CMS returned status {0}")]
    Status(u16),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct QueryResponse<T> {
    result: Option<T>,
}

/// Client for the headless CMS's HTTP query API.
#[derive(Clone)]
pub struct ContentClient {
    inner: Arc<ContentClientInner>,
}

struct ContentClientInner {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
    cache: Cache<String, ProductContent>,
}

impl ContentClient {
    /// Create a new content client from configuration.
    #[must_use]
    pub fn new(config: &ContentConfig) -> Self {
        let endpoint = format!(
            "https://{}.api.sanity.io/v{}/data/query/{}",
            config.project_id, config.api_version, config.dataset
        );

        Self::with_endpoint(
            endpoint,
            config
                .api_token
                .as_ref()
                .map(|t| t.expose_secret().to_string()),
        )
    }

    /// Create a client against an explicit query endpoint.
    ///
    /// Used by tests to point the client at a local mock server; production
    /// code goes through [`Self::new`].
    #[must_use]
    pub fn with_endpoint(endpoint: impl Into<String>, token: Option<String>) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(ContentClientInner {
                client: reqwest::Client::new(),
                endpoint: endpoint.into(),
                token,
                cache,
            }),
        }
    }

    /// Fetch all editorial content for a product handle.
    ///
    /// Products with no content documents yield an empty [`ProductContent`];
    /// that is normal, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// parsed.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn product_content(&self, handle: &str) -> Result<ProductContent, ContentError> {
        if let Some(content) = self.inner.cache.get(handle).await {
            debug!("Cache hit for product content");
            return Ok(content);
        }

        // GROQ parameters are passed as JSON-encoded query-string values
        let handle_param = serde_json::to_string(handle)?;

        let mut request = self
            .inner
            .client
            .get(&self.inner.endpoint)
            .query(&[
                ("query", PRODUCT_CONTENT_QUERY),
                ("$productHandle", handle_param.as_str()),
            ]);

        if let Some(token) = &self.inner.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "CMS returned non-success status"
            );
            return Err(ContentError::Status(status.as_u16()));
        }

        let parsed: QueryResponse<ProductContent> = serde_json::from_str(&response_text)?;
        let content = parsed.result.unwrap_or_default();

        self.inner
            .cache
            .insert(handle.to_string(), content.clone())
            .await;

        Ok(content)
    }

    /// Invalidate cached content for a product handle.
    pub async fn invalidate(&self, handle: &str) {
        self.inner.cache.invalidate(handle).await;
    }
}
