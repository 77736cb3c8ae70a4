//! Shopify Storefront API client implementation.
//!
//! Hand-written GraphQL documents are POSTed with `reqwest`; responses
//! deserialize into wire structs and convert to the domain types. Catalog
//! responses are cached using `moka` (5-minute TTL).

mod cache;
mod conversions;
mod documents;
mod wire;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument};

use driftwood_core::{CartId, CartLineId};

use crate::cart::{CartService, CartServiceError};
use crate::config::ShopifyConfig;
use crate::shopify::{GraphQLError, ShopifyError};
use crate::shopify::types::{
    Cart, CartLineInput, CartLineUpdateInput, Product, ProductConnection,
};

use cache::CacheValue;
use conversions::{convert_cart, convert_product, convert_product_connection};

/// Default page size for product listings.
const DEFAULT_PAGE_SIZE: i64 = 20;

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Provides type-safe access to products and cart operations.
/// Products are cached for 5 minutes; carts are never cached.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
    cache: Cache<String, CacheValue>,
}

#[derive(serde::Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLError>>,
}

impl StorefrontClient {
    /// Create a new Storefront API client from configuration.
    #[must_use]
    pub fn new(config: &ShopifyConfig) -> Self {
        let endpoint = format!(
            "https://{}/api/{}/graphql.json",
            config.store, config.api_version
        );

        Self::with_endpoint(
            endpoint,
            config.storefront_private_token.expose_secret().to_string(),
        )
    }

    /// Create a client against an explicit GraphQL endpoint.
    ///
    /// Used by tests to point the client at a local mock server; production
    /// code goes through [`Self::new`].
    #[must_use]
    pub fn with_endpoint(endpoint: impl Into<String>, access_token: impl Into<String>) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(StorefrontClientInner {
                client: reqwest::Client::new(),
                endpoint: endpoint.into(),
                access_token: access_token.into(),
                cache,
            }),
        }
    }

    /// Execute a GraphQL document.
    async fn execute<T: DeserializeOwned>(
        &self,
        document: &str,
        variables: serde_json::Value,
    ) -> Result<T, ShopifyError> {
        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            // Private access tokens use a different header than public tokens
            // See: https://shopify.dev/docs/storefronts/headless/building-with-the-storefront-api/getting-started
            .header(
                "Shopify-Storefront-Private-Token",
                &self.inner.access_token,
            )
            .header("Content-Type", "application/json")
            .json(&json!({ "query": document, "variables": variables }))
            .send()
            .await?;

        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify API returned non-success status"
            );
            return Err(ShopifyError::GraphQL(vec![GraphQLError::message(format!(
                "HTTP {status}: {}",
                response_text.chars().take(200).collect::<String>()
            ))]));
        }

        let response: GraphQlResponse<T> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse Shopify GraphQL response"
                );
                return Err(ShopifyError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            tracing::debug!(errors = ?errors, "GraphQL errors in response");
            return Err(ShopifyError::GraphQL(errors));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify GraphQL response has no data and no errors"
            );
            ShopifyError::GraphQL(vec![GraphQLError::message("No data in response")])
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a product by its handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_product_by_handle(&self, handle: &str) -> Result<Product, ShopifyError> {
        let cache_key = format!("product:{handle}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let data = self
            .execute::<wire::ProductData>(
                documents::GET_PRODUCT_BY_HANDLE,
                json!({ "handle": handle }),
            )
            .await?;

        let product_data = data
            .product
            .ok_or_else(|| ShopifyError::NotFound(format!("Product not found: {handle}")))?;

        let product = convert_product(product_data);

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get a paginated list of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        first: Option<i64>,
        after: Option<String>,
    ) -> Result<ProductConnection, ShopifyError> {
        let cache_key = format!("products:{}", after.as_deref().unwrap_or(""));

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let data = self
            .execute::<wire::ProductsData>(
                documents::GET_PRODUCTS,
                json!({
                    "first": first.unwrap_or(DEFAULT_PAGE_SIZE),
                    "after": after,
                }),
            )
            .await?;

        let connection = convert_product_connection(data.products);

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(connection.clone()))
            .await;

        Ok(connection)
    }

    // =========================================================================
    // Cart Methods (not cached - mutable state)
    // =========================================================================

    /// Create a new cart, optionally with initial lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart creation fails or user errors are returned.
    #[instrument(skip(self, lines))]
    pub async fn create_cart(
        &self,
        lines: Option<Vec<CartLineInput>>,
    ) -> Result<Cart, ShopifyError> {
        let input = match lines {
            Some(lines) => json!({ "lines": lines }),
            None => json!({}),
        };

        let data = self
            .execute::<wire::CartCreateData>(documents::CART_CREATE, json!({ "input": input }))
            .await?;

        cart_from_payload(data.cart_create, "create cart")
    }

    /// Get an existing cart.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::NotFound`] if the id no longer resolves to a
    /// cart (expired or deleted), or another error if the request fails.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn get_cart(&self, cart_id: &CartId) -> Result<Cart, ShopifyError> {
        let data = self
            .execute::<wire::CartData>(documents::GET_CART, json!({ "id": cart_id }))
            .await?;

        data.cart
            .map(convert_cart)
            .ok_or_else(|| ShopifyError::NotFound(format!("Cart not found: {cart_id}")))
    }

    /// Add lines to a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart update fails or user errors are returned.
    #[instrument(skip(self, lines), fields(cart_id = %cart_id))]
    pub async fn add_to_cart(
        &self,
        cart_id: &CartId,
        lines: Vec<CartLineInput>,
    ) -> Result<Cart, ShopifyError> {
        let data = self
            .execute::<wire::CartLinesAddData>(
                documents::CART_LINES_ADD,
                json!({ "cartId": cart_id, "lines": lines }),
            )
            .await?;

        cart_from_payload(data.cart_lines_add, "add to cart")
    }

    /// Update cart lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart update fails or user errors are returned.
    #[instrument(skip(self, lines), fields(cart_id = %cart_id))]
    pub async fn update_cart(
        &self,
        cart_id: &CartId,
        lines: Vec<CartLineUpdateInput>,
    ) -> Result<Cart, ShopifyError> {
        let data = self
            .execute::<wire::CartLinesUpdateData>(
                documents::CART_LINES_UPDATE,
                json!({ "cartId": cart_id, "lines": lines }),
            )
            .await?;

        cart_from_payload(data.cart_lines_update, "update cart")
    }

    /// Remove lines from a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart update fails or user errors are returned.
    #[instrument(skip(self, line_ids), fields(cart_id = %cart_id))]
    pub async fn remove_from_cart(
        &self,
        cart_id: &CartId,
        line_ids: Vec<CartLineId>,
    ) -> Result<Cart, ShopifyError> {
        let data = self
            .execute::<wire::CartLinesRemoveData>(
                documents::CART_LINES_REMOVE,
                json!({ "cartId": cart_id, "lineIds": line_ids }),
            )
            .await?;

        cart_from_payload(data.cart_lines_remove, "remove from cart")
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate a cached product.
    pub async fn invalidate_product(&self, handle: &str) {
        let cache_key = format!("product:{handle}");
        self.inner.cache.invalidate(&cache_key).await;
    }

    /// Invalidate all cached data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

/// Extract the cart from a mutation payload, surfacing the first user error
/// verbatim when the platform rejected the intent.
fn cart_from_payload(
    payload: Option<wire::CartMutationPayload>,
    operation: &str,
) -> Result<Cart, ShopifyError> {
    let Some(payload) = payload else {
        return Err(failed(operation));
    };

    if let Some(user_error) = payload.user_errors.into_iter().next() {
        return Err(ShopifyError::UserError(user_error.message));
    }

    payload
        .cart
        .map(convert_cart)
        .ok_or_else(|| failed(operation))
}

fn failed(operation: &str) -> ShopifyError {
    ShopifyError::GraphQL(vec![GraphQLError::message(format!("Failed to {operation}"))])
}

// =============================================================================
// CartService implementation
// =============================================================================

impl From<ShopifyError> for CartServiceError {
    fn from(err: ShopifyError) -> Self {
        match err {
            ShopifyError::NotFound(_) => Self::NotFound,
            ShopifyError::UserError(message) => Self::Rejected(message),
            other => Self::Transport(other.to_string()),
        }
    }
}

impl CartService for StorefrontClient {
    async fn create_cart(&self) -> Result<Cart, CartServiceError> {
        Self::create_cart(self, None).await.map_err(Into::into)
    }

    async fn fetch_cart(&self, id: &CartId) -> Result<Cart, CartServiceError> {
        self.get_cart(id).await.map_err(Into::into)
    }

    async fn add_lines(
        &self,
        id: &CartId,
        lines: Vec<CartLineInput>,
    ) -> Result<Cart, CartServiceError> {
        self.add_to_cart(id, lines).await.map_err(Into::into)
    }

    async fn update_lines(
        &self,
        id: &CartId,
        lines: Vec<CartLineUpdateInput>,
    ) -> Result<Cart, CartServiceError> {
        self.update_cart(id, lines).await.map_err(Into::into)
    }

    async fn remove_lines(
        &self,
        id: &CartId,
        line_ids: Vec<CartLineId>,
    ) -> Result<Cart, CartServiceError> {
        self.remove_from_cart(id, line_ids).await.map_err(Into::into)
    }
}
