//! Remote cart service boundary.
//!
//! [`CartSync`](super::CartSync) talks to the commerce platform exclusively
//! through this trait, so it can be driven against any cart API with the
//! same operation set - the production implementation is the Storefront API
//! client, tests use a scripted stand-in.

use std::future::Future;

use thiserror::Error;

use driftwood_core::{CartId, CartLineId};

use crate::shopify::types::{Cart, CartLineInput, CartLineUpdateInput};

/// How a remote cart operation failed.
///
/// The distinction matters to the caller: an unknown id can be recovered by
/// creating a fresh cart, a rejection carries a message for the shopper, and
/// a transport failure is surfaced generically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartServiceError {
    /// The id no longer resolves to a cart (expired or deleted remotely).
    #[error("cart not found")]
    NotFound,

    /// The platform executed the request but rejected the business intent
    /// (e.g. insufficient inventory). Carries the first message verbatim.
    #[error("{0}")]
    Rejected(String),

    /// The request could not complete (network, protocol, or server failure).
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Remote cart operations. Every mutation returns the full updated cart.
pub trait CartService {
    /// Create a new empty cart.
    fn create_cart(&self) -> impl Future<Output = Result<Cart, CartServiceError>> + Send;

    /// Fetch a cart by id.
    fn fetch_cart(
        &self,
        id: &CartId,
    ) -> impl Future<Output = Result<Cart, CartServiceError>> + Send;

    /// Add lines to a cart.
    fn add_lines(
        &self,
        id: &CartId,
        lines: Vec<CartLineInput>,
    ) -> impl Future<Output = Result<Cart, CartServiceError>> + Send;

    /// Update existing lines.
    fn update_lines(
        &self,
        id: &CartId,
        lines: Vec<CartLineUpdateInput>,
    ) -> impl Future<Output = Result<Cart, CartServiceError>> + Send;

    /// Remove lines.
    fn remove_lines(
        &self,
        id: &CartId,
        line_ids: Vec<CartLineId>,
    ) -> impl Future<Output = Result<Cart, CartServiceError>> + Send;
}
