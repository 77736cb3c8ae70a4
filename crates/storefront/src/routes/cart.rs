//! Cart route handlers.
//!
//! These handlers are stateless forwarders to the Storefront API: the
//! browser holds the cart identifier durably and round-trips it in the
//! path, so nothing cart-related is kept server-side. Mutation responses
//! wrap the platform's returned cart as `{"cart": ...}`; business-rule
//! rejections surface as 400 with the platform's message.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use driftwood_core::{CartId, CartLineId, VariantId};

use crate::error::Result;
use crate::shopify::types::{Cart, CartLineInput, CartLineUpdateInput};
use crate::state::AppState;

/// Add to cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub merchandise_id: VariantId,
    pub quantity: Option<u32>,
}

/// Update cart line request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub line_id: CartLineId,
    pub quantity: i64,
}

/// Remove cart line request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemRequest {
    pub line_id: CartLineId,
}

/// Mutation response envelope.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart: Cart,
}

/// Create a new empty cart.
#[instrument(skip(state))]
pub async fn create(State(state): State<AppState>) -> Result<Json<CartResponse>> {
    let cart = state.storefront().create_cart(None).await?;
    Ok(Json(CartResponse { cart }))
}

/// Fetch a cart by id.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Cart>> {
    let cart = state.storefront().get_cart(&CartId::new(id)).await?;
    Ok(Json(cart))
}

/// Add an item to a cart.
#[instrument(skip(state, request))]
pub async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<CartResponse>> {
    let line = CartLineInput {
        merchandise_id: request.merchandise_id,
        quantity: i64::from(request.quantity.unwrap_or(1)),
    };

    let cart = state
        .storefront()
        .add_to_cart(&CartId::new(id), vec![line])
        .await?;
    Ok(Json(CartResponse { cart }))
}

/// Update an item's quantity.
#[instrument(skip(state, request))]
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateItemRequest>,
) -> Result<Json<CartResponse>> {
    let line = CartLineUpdateInput {
        id: request.line_id,
        quantity: request.quantity,
    };

    let cart = state
        .storefront()
        .update_cart(&CartId::new(id), vec![line])
        .await?;
    Ok(Json(CartResponse { cart }))
}

/// Remove an item from a cart.
#[instrument(skip(state, request))]
pub async fn remove_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<RemoveItemRequest>,
) -> Result<Json<CartResponse>> {
    let cart = state
        .storefront()
        .remove_from_cart(&CartId::new(id), vec![request.line_id])
        .await?;
    Ok(Json(CartResponse { cart }))
}

/// Redirect to the hosted checkout for a cart.
///
/// A cart that cannot be fetched sends the shopper back to the storefront
/// root rather than a dead end.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>, Path(cart_id): Path<String>) -> Response {
    match state.storefront().get_cart(&CartId::new(cart_id)).await {
        Ok(cart) => Redirect::to(&cart.checkout_url).into_response(),
        Err(e) => {
            tracing::error!("Failed to get cart for checkout: {e}");
            Redirect::to("/").into_response()
        }
    }
}
