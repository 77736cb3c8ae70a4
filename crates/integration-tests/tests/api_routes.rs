//! JSON API tests over real HTTP.
//!
//! The full storefront router is served on an ephemeral port with its
//! clients pointed at the mock platform, then driven with `reqwest` the way
//! the browser storefront drives it.

use std::path::PathBuf;

use axum::Router;
use secrecy::SecretString;
use serde_json::{Value, json};

use driftwood_integration_tests::{
    MockPlatform, cart_create_data, cart_mutation_data, user_error_data, wire_cart, wire_product,
};
use driftwood_storefront::config::{ContentConfig, ShopifyConfig, StorefrontConfig};
use driftwood_storefront::content::ContentClient;
use driftwood_storefront::routes;
use driftwood_storefront::shopify::StorefrontClient;
use driftwood_storefront::state::AppState;

fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().expect("host"),
        port: 0,
        base_url: "http://localhost:3001".to_string(),
        shopify: ShopifyConfig {
            store: "test.myshopify.com".to_string(),
            api_version: "2026-01".to_string(),
            storefront_private_token: SecretString::from("test-token"),
        },
        content: ContentConfig {
            project_id: "testproj".to_string(),
            dataset: "production".to_string(),
            api_version: "2024-01-01".to_string(),
            api_token: None,
        },
        cart_store_path: PathBuf::from(".driftwood/cart-id"),
        sentry_dsn: None,
    }
}

/// Serve the real router against the mock platform; returns the base URL.
async fn spawn_app(mock: &MockPlatform) -> String {
    let storefront = StorefrontClient::with_endpoint(mock.graphql_endpoint(), "test-token");
    let content = ContentClient::with_endpoint(mock.content_endpoint(), None);
    let state = AppState::with_clients(test_config(), storefront, content);

    let app = Router::new().merge(routes::routes()).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind app");
    let addr = listener.local_addr().expect("app addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve app");
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn test_cart_create_add_update_remove() {
    let mock = MockPlatform::spawn().await;
    mock.enqueue_data("cartCreate", cart_create_data(wire_cart("c1", &[], "0.00")));
    mock.enqueue_data(
        "cartLinesAdd",
        cart_mutation_data("cartLinesAdd", wire_cart("c1", &[("l1", "v1", 1)], "19.99")),
    );
    mock.enqueue_data(
        "cartLinesUpdate",
        cart_mutation_data("cartLinesUpdate", wire_cart("c1", &[("l1", "v1", 3)], "59.97")),
    );
    mock.enqueue_data(
        "cartLinesRemove",
        cart_mutation_data("cartLinesRemove", wire_cart("c1", &[], "0.00")),
    );

    let base = spawn_app(&mock).await;
    let client = reqwest::Client::new();

    // Create
    let body: Value = client
        .post(format!("{base}/api/cart"))
        .send()
        .await
        .expect("create request")
        .json()
        .await
        .expect("create body");
    assert_eq!(body["cart"]["id"], "c1");
    assert_eq!(body["cart"]["totalQuantity"], 0);

    // Add (quantity defaults to 1 when omitted)
    let body: Value = client
        .post(format!("{base}/api/cart/c1/items"))
        .json(&json!({ "merchandiseId": "v1" }))
        .send()
        .await
        .expect("add request")
        .json()
        .await
        .expect("add body");
    assert_eq!(body["cart"]["totalQuantity"], 1);
    assert_eq!(
        mock.variables_for("cartLinesAdd").first().expect("add vars")["lines"][0]["quantity"],
        1
    );

    // Update
    let body: Value = client
        .put(format!("{base}/api/cart/c1/items"))
        .json(&json!({ "lineId": "l1", "quantity": 3 }))
        .send()
        .await
        .expect("update request")
        .json()
        .await
        .expect("update body");
    assert_eq!(body["cart"]["totalQuantity"], 3);

    // Remove
    let body: Value = client
        .delete(format!("{base}/api/cart/c1/items"))
        .json(&json!({ "lineId": "l1" }))
        .send()
        .await
        .expect("remove request")
        .json()
        .await
        .expect("remove body");
    assert_eq!(body["cart"]["lines"], json!([]));
}

#[tokio::test]
async fn test_rejected_mutation_maps_to_400_with_message() {
    let mock = MockPlatform::spawn().await;
    mock.enqueue_data("cartLinesAdd", user_error_data("cartLinesAdd", "Out of stock"));

    let base = spawn_app(&mock).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/cart/c1/items"))
        .json(&json!({ "merchandiseId": "v1", "quantity": 2 }))
        .send()
        .await
        .expect("add request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("error body");
    assert_eq!(body["error"], "Out of stock");
}

#[tokio::test]
async fn test_unknown_cart_is_404() {
    let mock = MockPlatform::spawn().await;
    mock.enqueue_data("getCart", json!({ "cart": null }));

    let base = spawn_app(&mock).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/api/cart/nope"))
        .send()
        .await
        .expect("fetch request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_product_listing_and_detail() {
    let mock = MockPlatform::spawn().await;
    mock.enqueue_data(
        "getProducts",
        json!({ "products": {
            "pageInfo": {
                "hasNextPage": false,
                "hasPreviousPage": false,
                "startCursor": null,
                "endCursor": null
            },
            "nodes": [wire_product("canvas-tote", "v1")]
        }}),
    );
    mock.enqueue_data("getProduct", json!({ "product": wire_product("canvas-tote", "v1") }));
    mock.enqueue_data("getProduct", json!({ "product": null }));

    let base = spawn_app(&mock).await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(format!("{base}/api/products?first=5"))
        .send()
        .await
        .expect("list request")
        .json()
        .await
        .expect("list body");
    assert_eq!(body["products"][0]["handle"], "canvas-tote");
    assert_eq!(body["pageInfo"]["hasNextPage"], false);

    let body: Value = client
        .get(format!("{base}/api/products/canvas-tote"))
        .send()
        .await
        .expect("detail request")
        .json()
        .await
        .expect("detail body");
    assert_eq!(body["variants"][0]["id"], "v1");

    let response = client
        .get(format!("{base}/api/products/missing"))
        .send()
        .await
        .expect("missing request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_content_route_returns_cms_sections() {
    let mock = MockPlatform::spawn().await;
    mock.enqueue_content(json!({
        "faqs": {
            "title": "FAQs",
            "faqs": [{ "question": "Does it float?", "answer": "Yes." }]
        },
        "highlights": null,
        "features": null,
        "description": null
    }));

    let base = spawn_app(&mock).await;

    let body: Value = reqwest::Client::new()
        .get(format!("{base}/api/content/canvas-tote"))
        .send()
        .await
        .expect("content request")
        .json()
        .await
        .expect("content body");

    assert_eq!(body["faqs"]["faqs"][0]["question"], "Does it float?");
    assert_eq!(body["highlights"], Value::Null);
}

#[tokio::test]
async fn test_checkout_redirects_to_hosted_checkout() {
    let mock = MockPlatform::spawn().await;
    mock.enqueue_data("getCart", json!({ "cart": wire_cart("c1", &[("l1", "v1", 1)], "19.99") }));

    let base = spawn_app(&mock).await;

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("client");

    let response = client
        .get(format!("{base}/checkout/c1"))
        .send()
        .await
        .expect("checkout request");

    assert!(response.status().is_redirection());
    assert_eq!(
        response
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok()),
        Some("https://checkout.example.com/c1")
    );
}
