//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//!
//! # Cart (stateless forwarders; the browser owns the cart id)
//! POST   /api/cart              - Create an empty cart
//! GET    /api/cart/{id}         - Fetch a cart
//! POST   /api/cart/{id}/items   - Add a line        {merchandiseId, quantity}
//! PUT    /api/cart/{id}/items   - Update a line     {lineId, quantity}
//! DELETE /api/cart/{id}/items   - Remove a line     {lineId}
//!
//! # Catalog
//! GET  /api/products            - Paginated product list (?first=&after=)
//! GET  /api/products/{handle}   - Product detail
//!
//! # Editorial content
//! GET  /api/content/{handle}    - CMS content for a product handle
//!
//! # Checkout
//! GET  /checkout/{cart_id}      - Redirect to the hosted checkout
//! ```

pub mod cart;
pub mod content;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart API routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(cart::create))
        .route("/{id}", get(cart::show))
        .route(
            "/{id}/items",
            post(cart::add_item)
                .put(cart::update_item)
                .delete(cart::remove_item),
        )
}

/// Create the product API routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{handle}", get(products::show))
}

/// Create the content API routes router.
pub fn content_routes() -> Router<AppState> {
    Router::new().route("/{handle}", get(content::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/cart", cart_routes())
        .nest("/api/products", product_routes())
        .nest("/api/content", content_routes())
        .route("/checkout/{cart_id}", get(cart::checkout))
}
