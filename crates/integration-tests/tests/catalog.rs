//! Catalog and content client tests over real HTTP.
//!
//! Mostly about the response caches: repeated reads must be served locally,
//! and invalidation must force the next read back to the upstream.

use serde_json::json;

use driftwood_integration_tests::{MockPlatform, wire_product};
use driftwood_storefront::content::ContentClient;
use driftwood_storefront::shopify::StorefrontClient;

fn client_against(mock: &MockPlatform) -> StorefrontClient {
    StorefrontClient::with_endpoint(mock.graphql_endpoint(), "test-token")
}

#[tokio::test]
async fn test_product_detail_is_cached_until_invalidated() {
    let mock = MockPlatform::spawn().await;
    mock.enqueue_data("getProduct", json!({ "product": wire_product("canvas-tote", "v1") }));
    mock.enqueue_data("getProduct", json!({ "product": wire_product("canvas-tote", "v2") }));

    let client = client_against(&mock);

    let first = client
        .get_product_by_handle("canvas-tote")
        .await
        .expect("first fetch");
    let second = client
        .get_product_by_handle("canvas-tote")
        .await
        .expect("cached fetch");

    // Second read is a cache hit: one upstream call, identical payload
    assert_eq!(mock.operations(), vec!["getProduct"]);
    assert_eq!(first, second);

    client.invalidate_product("canvas-tote").await;

    let third = client
        .get_product_by_handle("canvas-tote")
        .await
        .expect("refetch");
    assert_eq!(mock.operations(), vec!["getProduct", "getProduct"]);
    assert_eq!(third.variants.first().expect("variant").id.as_str(), "v2");
}

#[tokio::test]
async fn test_product_listing_is_cached_until_invalidated() {
    let mock = MockPlatform::spawn().await;
    let connection = json!({ "products": {
        "pageInfo": {
            "hasNextPage": false,
            "hasPreviousPage": false,
            "startCursor": null,
            "endCursor": null
        },
        "nodes": [wire_product("canvas-tote", "v1")]
    }});
    mock.enqueue_data("getProducts", connection.clone());
    mock.enqueue_data("getProducts", connection);

    let client = client_against(&mock);

    let first = client.get_products(Some(5), None).await.expect("list");
    let second = client.get_products(Some(5), None).await.expect("cached list");
    assert_eq!(mock.operations(), vec!["getProducts"]);
    assert_eq!(first, second);

    client.invalidate_all().await;

    client.get_products(Some(5), None).await.expect("relist");
    assert_eq!(mock.operations(), vec!["getProducts", "getProducts"]);
}

#[tokio::test]
async fn test_content_is_cached_until_invalidated() {
    let mock = MockPlatform::spawn().await;
    // Exactly one scripted response: a cache miss on the second read would
    // come back empty and the assertion below would catch it
    mock.enqueue_content(json!({
        "faqs": { "title": "FAQs", "faqs": [{ "question": "Q", "answer": "A" }] },
        "highlights": null,
        "features": null,
        "description": null
    }));

    let client = ContentClient::with_endpoint(mock.content_endpoint(), None);

    let first = client.product_content("canvas-tote").await.expect("fetch");
    let second = client.product_content("canvas-tote").await.expect("cached");
    assert_eq!(first, second);
    assert!(first.faqs.is_some());

    client.invalidate("canvas-tote").await;

    // No more scripted responses: the refetch reaches upstream and gets
    // an empty result
    let third = client.product_content("canvas-tote").await.expect("refetch");
    assert!(third.faqs.is_none());
}
