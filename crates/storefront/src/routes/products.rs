//! Product catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::shopify::types::{Product, ProductConnection};
use crate::state::AppState;

/// Pagination parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub first: Option<i64>,
    pub after: Option<String>,
}

/// List products, paginated by cursor.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<ProductConnection>> {
    let connection = state
        .storefront()
        .get_products(query.first, query.after)
        .await?;
    Ok(Json(connection))
}

/// Fetch one product by handle.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<Product>> {
    let product = state.storefront().get_product_by_handle(&handle).await?;
    Ok(Json(product))
}
