//! Cache types for Storefront API responses.

use crate::shopify::types::{Product, ProductConnection};

/// Cached value types. Only catalog responses are cached; cart state is
/// mutable and always fetched fresh.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(ProductConnection),
}
