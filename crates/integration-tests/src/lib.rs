//! Integration test support for Driftwood.
//!
//! Provides [`MockPlatform`], an in-process stand-in for the upstream
//! services: the commerce platform's GraphQL endpoint and the CMS's query
//! endpoint. Tests script responses per operation and then drive the real
//! clients (and the real router) over real HTTP.
//!
//! ```rust,ignore
//! let mock = MockPlatform::spawn().await;
//! mock.enqueue_data("cartCreate", cart_create_data(wire_cart("c1", &[], "0.00")));
//!
//! let client = StorefrontClient::with_endpoint(mock.graphql_endpoint(), "test-token");
//! let cart = client.create_cart(None).await?;
//! ```

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};

/// One request the mock platform has served.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Detected operation name (e.g. `cartCreate`, `getCart`).
    pub operation: String,
    /// The GraphQL variables the client sent.
    pub variables: Value,
}

enum MockResponse {
    Json(Value),
    Status(StatusCode),
}

#[derive(Default)]
struct MockState {
    responses: Mutex<HashMap<String, VecDeque<MockResponse>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    content_responses: Mutex<VecDeque<Value>>,
}

impl MockState {
    fn responses(&self) -> MutexGuard<'_, HashMap<String, VecDeque<MockResponse>>> {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn requests(&self) -> MutexGuard<'_, Vec<RecordedRequest>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// In-process mock of the commerce platform and CMS endpoints.
pub struct MockPlatform {
    state: Arc<MockState>,
    addr: SocketAddr,
}

impl MockPlatform {
    /// Bind an ephemeral port and start serving.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn spawn() -> Self {
        let state = Arc::new(MockState::default());

        let app = Router::new()
            .route("/graphql", post(graphql_handler))
            .route("/content-query", get(content_handler))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock platform");
        let addr = listener.local_addr().expect("mock platform addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock platform");
        });

        Self { state, addr }
    }

    /// The GraphQL endpoint URL, for `StorefrontClient::with_endpoint`.
    #[must_use]
    pub fn graphql_endpoint(&self) -> String {
        format!("http://{}/graphql", self.addr)
    }

    /// The CMS query endpoint URL, for `ContentClient::with_endpoint`.
    #[must_use]
    pub fn content_endpoint(&self) -> String {
        format!("http://{}/content-query", self.addr)
    }

    /// Script a raw GraphQL response body for the next call of `operation`.
    pub fn enqueue(&self, operation: &str, response: Value) {
        self.state
            .responses()
            .entry(operation.to_string())
            .or_default()
            .push_back(MockResponse::Json(response));
    }

    /// Script a successful response with the given `data`.
    pub fn enqueue_data(&self, operation: &str, data: Value) {
        self.enqueue(operation, json!({ "data": data }));
    }

    /// Script a bare HTTP status (e.g. 500) for the next call of `operation`.
    pub fn enqueue_status(&self, operation: &str, status: u16) {
        self.state
            .responses()
            .entry(operation.to_string())
            .or_default()
            .push_back(MockResponse::Status(
                StatusCode::from_u16(status).expect("valid status code"),
            ));
    }

    /// Script the `result` of the next CMS content query.
    pub fn enqueue_content(&self, result: Value) {
        self.state
            .content_responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(result);
    }

    /// All GraphQL requests served so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests().clone()
    }

    /// The operation names served so far, in order.
    #[must_use]
    pub fn operations(&self) -> Vec<String> {
        self.state
            .requests()
            .iter()
            .map(|r| r.operation.clone())
            .collect()
    }

    /// Variables of every request for one operation.
    #[must_use]
    pub fn variables_for(&self, operation: &str) -> Vec<Value> {
        self.state
            .requests()
            .iter()
            .filter(|r| r.operation == operation)
            .map(|r| r.variables.clone())
            .collect()
    }
}

/// Identify the operation from the request's query text. Longest names are
/// matched first so `getProducts` is not mistaken for `getProduct`.
fn detect_operation(query: &str) -> &'static str {
    const OPERATIONS: &[&str] = &[
        "cartLinesUpdate",
        "cartLinesRemove",
        "cartLinesAdd",
        "cartCreate",
        "getProducts",
        "getProduct",
        "getCart",
    ];

    OPERATIONS
        .iter()
        .find(|op| query.contains(**op))
        .copied()
        .unwrap_or("unknown")
}

async fn graphql_handler(
    State(state): State<Arc<MockState>>,
    Json(body): Json<Value>,
) -> Response {
    let query = body["query"].as_str().unwrap_or_default();
    let operation = detect_operation(query);

    state.requests().push(RecordedRequest {
        operation: operation.to_string(),
        variables: body["variables"].clone(),
    });

    let scripted = state
        .responses()
        .get_mut(operation)
        .and_then(VecDeque::pop_front);

    match scripted {
        Some(MockResponse::Json(value)) => Json(value).into_response(),
        Some(MockResponse::Status(status)) => {
            (status, format!("scripted {status} for {operation}")).into_response()
        }
        None => Json(json!({
            "errors": [{ "message": format!("unscripted operation: {operation}") }]
        }))
        .into_response(),
    }
}

async fn content_handler(
    State(state): State<Arc<MockState>>,
    Query(_params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let result = state
        .content_responses
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .pop_front()
        .unwrap_or(Value::Null);

    Json(json!({ "result": result, "ms": 1 }))
}

// =============================================================================
// Wire fixtures
// =============================================================================

/// A wire-format money object.
#[must_use]
pub fn money(amount: &str) -> Value {
    json!({ "amount": amount, "currencyCode": "USD" })
}

/// A wire-format cart. `lines` entries are `(line_id, variant_id, quantity)`.
#[must_use]
pub fn wire_cart(id: &str, lines: &[(&str, &str, i64)], total: &str) -> Value {
    let total_quantity: i64 = lines.iter().map(|l| l.2).sum();
    let nodes: Vec<Value> = lines
        .iter()
        .map(|(line_id, variant_id, quantity)| {
            json!({
                "id": line_id,
                "quantity": quantity,
                "merchandise": {
                    "id": variant_id,
                    "title": "Large / Sand",
                    "price": money("19.99"),
                    "selectedOptions": [],
                    "image": null,
                    "product": {
                        "id": "gid://shop/Product/p1",
                        "title": "Canvas Tote",
                        "handle": "canvas-tote",
                        "images": { "nodes": [] }
                    }
                }
            })
        })
        .collect();

    json!({
        "id": id,
        "totalQuantity": total_quantity,
        "checkoutUrl": format!("https://checkout.example.com/{id}"),
        "cost": {
            "subtotalAmount": money(total),
            "totalAmount": money(total),
            "totalTaxAmount": null
        },
        "lines": { "nodes": nodes }
    })
}

/// `data` payload for a successful `cartCreate`.
#[must_use]
pub fn cart_create_data(cart: Value) -> Value {
    json!({ "cartCreate": { "cart": cart, "userErrors": [] } })
}

/// `data` payload for a successful cart mutation under `key`
/// (e.g. `cartLinesAdd`).
#[must_use]
pub fn cart_mutation_data(key: &str, cart: Value) -> Value {
    json!({ key: { "cart": cart, "userErrors": [] } })
}

/// `data` payload for a mutation rejected with a user error.
#[must_use]
pub fn user_error_data(key: &str, message: &str) -> Value {
    json!({ key: { "cart": null, "userErrors": [{ "field": ["lines"], "message": message }] } })
}

/// A wire-format product with a single variant.
#[must_use]
pub fn wire_product(handle: &str, variant_id: &str) -> Value {
    json!({
        "id": format!("gid://shop/Product/{handle}"),
        "title": "Canvas Tote",
        "handle": handle,
        "description": "A sturdy tote.",
        "tags": ["bags"],
        "availableForSale": true,
        "priceRange": {
            "minVariantPrice": money("19.99"),
            "maxVariantPrice": money("24.99")
        },
        "compareAtPriceRange": null,
        "images": { "nodes": [] },
        "variants": { "nodes": [{
            "id": variant_id,
            "title": "Default Title",
            "availableForSale": true,
            "price": money("19.99"),
            "compareAtPrice": null,
            "selectedOptions": []
        }]},
        "options": []
    })
}
