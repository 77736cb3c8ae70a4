//! End-to-end cart synchronization tests over real HTTP.
//!
//! These drive the real Storefront API client (wire format included)
//! against the in-process mock platform, with the cart id persisted in a
//! file-backed store the way the CLI runs it.

use rust_decimal::Decimal;
use serde_json::json;

use driftwood_core::CartId;
use driftwood_integration_tests::{
    MockPlatform, cart_create_data, cart_mutation_data, user_error_data, wire_cart,
};
use driftwood_storefront::cart::{CartIdStore, CartStatus, CartSync, FileStore};
use driftwood_storefront::shopify::StorefrontClient;

fn temp_store(name: &str) -> FileStore {
    let path = std::env::temp_dir()
        .join("driftwood-integration-tests")
        .join(format!("{name}-{}", uuid::Uuid::new_v4()))
        .join("cart-id");
    FileStore::new(path)
}

fn sync_against(mock: &MockPlatform, store: FileStore) -> CartSync<StorefrontClient, FileStore> {
    let client = StorefrontClient::with_endpoint(mock.graphql_endpoint(), "test-token");
    CartSync::new(client, store)
}

#[tokio::test]
async fn test_create_then_add_lifecycle() {
    let mock = MockPlatform::spawn().await;
    mock.enqueue_data("cartCreate", cart_create_data(wire_cart("c1", &[], "0.00")));
    mock.enqueue_data(
        "cartLinesAdd",
        cart_mutation_data(
            "cartLinesAdd",
            wire_cart("c1", &[("l1", "gid://shop/ProductVariant/v1", 2)], "39.98"),
        ),
    );

    let store = temp_store("lifecycle");
    let sync = sync_against(&mock, store.clone());

    sync.initialize().await;
    assert_eq!(sync.status(), CartStatus::Ready);
    assert_eq!(sync.item_count(), 0);
    assert_eq!(store.load(), Some(CartId::new("c1")));

    sync.add_line("gid://shop/ProductVariant/v1".into(), 2).await;
    assert_eq!(sync.item_count(), 2);
    assert_eq!(sync.total(), Decimal::new(3998, 2));

    assert_eq!(mock.operations(), vec!["cartCreate", "cartLinesAdd"]);

    // The wire variables carry the platform's input shapes
    let add_variables = mock.variables_for("cartLinesAdd");
    assert_eq!(
        add_variables.first().expect("one add call"),
        &json!({
            "cartId": "c1",
            "lines": [{ "merchandiseId": "gid://shop/ProductVariant/v1", "quantity": 2 }]
        })
    );
}

#[tokio::test]
async fn test_expired_cart_is_replaced_on_initialize() {
    let mock = MockPlatform::spawn().await;
    // The platform no longer knows this cart: `cart` comes back null
    mock.enqueue_data("getCart", json!({ "cart": null }));
    mock.enqueue_data("cartCreate", cart_create_data(wire_cart("c-new", &[], "0.00")));

    let store = temp_store("expired");
    store
        .save(&CartId::new("c-old"))
        .expect("seed persisted id");
    let sync = sync_against(&mock, store.clone());

    sync.initialize().await;

    assert_eq!(mock.operations(), vec!["getCart", "cartCreate"]);
    assert_eq!(
        mock.variables_for("getCart").first().expect("one fetch"),
        &json!({ "id": "c-old" })
    );
    assert_eq!(store.load(), Some(CartId::new("c-new")));
    assert_eq!(sync.status(), CartStatus::Ready);
    assert!(sync.error().is_none());
}

#[tokio::test]
async fn test_rejection_keeps_snapshot_and_surfaces_message() {
    let mock = MockPlatform::spawn().await;
    mock.enqueue_data(
        "cartCreate",
        cart_create_data(wire_cart("c1", &[("l1", "v1", 1)], "19.99")),
    );
    mock.enqueue_data("cartLinesAdd", user_error_data("cartLinesAdd", "Out of stock"));

    let sync = sync_against(&mock, temp_store("rejection"));
    sync.initialize().await;
    let before = sync.snapshot().expect("snapshot after initialize");

    sync.add_line("v2".into(), 1).await;

    assert_eq!(sync.error(), Some("Out of stock".to_string()));
    assert_eq!(sync.snapshot().expect("snapshot kept"), before);
    assert_eq!(sync.status(), CartStatus::Errored);
}

#[tokio::test]
async fn test_server_failure_is_generic_transport_error() {
    let mock = MockPlatform::spawn().await;
    mock.enqueue_data(
        "cartCreate",
        cart_create_data(wire_cart("c1", &[("l1", "v1", 1)], "19.99")),
    );
    mock.enqueue_status("cartLinesAdd", 500);

    let sync = sync_against(&mock, temp_store("server-failure"));
    sync.initialize().await;

    sync.add_line("v2".into(), 1).await;

    assert_eq!(sync.error(), Some("Failed to add item to cart".to_string()));
    assert_eq!(sync.item_count(), 1);
}

#[tokio::test]
async fn test_update_zero_goes_out_as_remove() {
    let mock = MockPlatform::spawn().await;
    mock.enqueue_data(
        "cartCreate",
        cart_create_data(wire_cart("c1", &[("l1", "v1", 2)], "39.98")),
    );
    mock.enqueue_data(
        "cartLinesRemove",
        cart_mutation_data("cartLinesRemove", wire_cart("c1", &[], "0.00")),
    );

    let sync = sync_against(&mock, temp_store("update-zero"));
    sync.initialize().await;

    sync.update_line(&"l1".into(), 0).await;

    // No cartLinesUpdate ever goes over the wire
    assert_eq!(mock.operations(), vec!["cartCreate", "cartLinesRemove"]);
    assert_eq!(
        mock.variables_for("cartLinesRemove").first().expect("one remove"),
        &json!({ "cartId": "c1", "lineIds": ["l1"] })
    );
    assert_eq!(sync.item_count(), 0);
}
