//! Shopify Storefront API client.
//!
//! # Architecture
//!
//! - Hand-written GraphQL documents POSTed as JSON via `reqwest`; the
//!   platform owns the schema, so no generated schema ships in-tree
//! - Shopify is source of truth - NO local sync, direct API calls
//! - In-memory caching via `moka` for catalog responses (5 minute TTL);
//!   cart responses are never cached
//!
//! # Example
//!
//! ```rust,ignore
//! use driftwood_storefront::shopify::StorefrontClient;
//! use driftwood_storefront::shopify::types::CartLineInput;
//!
//! let client = StorefrontClient::new(&config.shopify);
//!
//! // Get a product
//! let product = client.get_product_by_handle("my-product").await?;
//!
//! // Create a cart and add items
//! let cart = client.create_cart(None).await?;
//! let cart = client.add_to_cart(&cart.id, vec![CartLineInput {
//!     merchandise_id: product.variants[0].id.clone(),
//!     quantity: 1,
//! }]).await?;
//! ```

mod storefront;
pub mod types;

pub use storefront::StorefrontClient;
pub use types::*;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when interacting with the Shopify Storefront API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// User error from mutation (e.g., out of stock). Carries the first
    /// message verbatim so callers can show it to the shopper.
    #[error("User error: {0}")]
    UserError(String),
}

/// A GraphQL error returned by the Shopify API.
///
/// Deserialized directly from the `errors` array of a GraphQL response.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    /// Error message.
    #[serde(default)]
    pub message: String,
    /// Source locations in the query.
    #[serde(default)]
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
}

impl GraphQLError {
    /// A bare error with only a message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path: Vec::new(),
        }
    }
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .enumerate()
        .map(|(i, e)| format_graphql_error(i, e))
        .collect::<Vec<_>>()
        .join("; ")
}

fn format_graphql_error(index: usize, error: &GraphQLError) -> String {
    let mut parts = Vec::new();

    if !error.message.is_empty() {
        parts.push(error.message.clone());
    }

    if !error.path.is_empty() {
        let path = error
            .path
            .iter()
            .map(|p| match p {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".");
        parts.push(format!("path: {path}"));
    }

    if let Some(loc) = error.locations.first() {
        parts.push(format!("at line {}:{}", loc.line, loc.column));
    }

    if parts.is_empty() {
        format!("[error {}]: (no details)", index + 1)
    } else {
        parts.join(" ")
    }
}
