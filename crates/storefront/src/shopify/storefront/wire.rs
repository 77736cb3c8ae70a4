//! Wire structs mirroring the Storefront API's JSON responses.
//!
//! Field selections follow the documents in [`super::documents`]; each
//! struct deserializes the platform's camelCase JSON verbatim and is then
//! mapped to the domain types by [`super::conversions`].

use serde::Deserialize;

use driftwood_core::Money;

/// A GraphQL connection flattened to its `nodes`.
#[derive(Debug, Deserialize)]
pub struct Nodes<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

// =============================================================================
// Shared field groups
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireImage {
    pub id: Option<String>,
    pub url: String,
    pub alt_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireSelectedOption {
    pub name: String,
    pub value: String,
}

// =============================================================================
// Product responses
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePriceRange {
    pub min_variant_price: Money,
    pub max_variant_price: Money,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireVariant {
    pub id: String,
    pub title: String,
    pub available_for_sale: bool,
    pub price: Money,
    pub compare_at_price: Option<Money>,
    #[serde(default)]
    pub selected_options: Vec<WireSelectedOption>,
}

#[derive(Debug, Deserialize)]
pub struct WireProductOption {
    pub id: String,
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireProduct {
    pub id: String,
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub available_for_sale: bool,
    pub price_range: WirePriceRange,
    pub compare_at_price_range: Option<WirePriceRange>,
    pub images: Nodes<WireImage>,
    pub variants: Nodes<WireVariant>,
    #[serde(default)]
    pub options: Vec<WireProductOption>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireProductConnection {
    pub page_info: WirePageInfo,
    pub nodes: Vec<WireProduct>,
}

/// `data` for the `getProduct` query.
#[derive(Debug, Deserialize)]
pub struct ProductData {
    pub product: Option<WireProduct>,
}

/// `data` for the `getProducts` query.
#[derive(Debug, Deserialize)]
pub struct ProductsData {
    pub products: WireProductConnection,
}

// =============================================================================
// Cart responses
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMerchandiseProduct {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub images: Nodes<WireImage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMerchandise {
    pub id: String,
    pub title: String,
    pub price: Money,
    #[serde(default)]
    pub selected_options: Vec<WireSelectedOption>,
    pub image: Option<WireImage>,
    pub product: WireMerchandiseProduct,
}

#[derive(Debug, Deserialize)]
pub struct WireCartLine {
    pub id: String,
    pub quantity: i64,
    pub merchandise: WireMerchandise,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCartCost {
    pub subtotal_amount: Money,
    pub total_amount: Money,
    pub total_tax_amount: Option<Money>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCart {
    pub id: String,
    pub total_quantity: i64,
    pub checkout_url: String,
    pub cost: WireCartCost,
    pub lines: Nodes<WireCartLine>,
}

#[derive(Debug, Deserialize)]
pub struct WireUserError {
    pub field: Option<Vec<String>>,
    pub message: String,
}

/// Payload shared by all cart mutations: the updated cart plus any
/// business-rule rejections.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMutationPayload {
    pub cart: Option<WireCart>,
    #[serde(default)]
    pub user_errors: Vec<WireUserError>,
}

/// `data` for the `getCart` query. `cart` is null for unknown or expired ids.
#[derive(Debug, Deserialize)]
pub struct CartData {
    pub cart: Option<WireCart>,
}

/// `data` for the `cartCreate` mutation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCreateData {
    pub cart_create: Option<CartMutationPayload>,
}

/// `data` for the `cartLinesAdd` mutation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinesAddData {
    pub cart_lines_add: Option<CartMutationPayload>,
}

/// `data` for the `cartLinesUpdate` mutation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinesUpdateData {
    pub cart_lines_update: Option<CartMutationPayload>,
}

/// `data` for the `cartLinesRemove` mutation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinesRemoveData {
    pub cart_lines_remove: Option<CartMutationPayload>,
}
