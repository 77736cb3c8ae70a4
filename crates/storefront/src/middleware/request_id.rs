//! Request ID middleware for tracing and error correlation.
//!
//! Every request gets an id: the one an upstream proxy already stamped on
//! `x-request-id`, or a fresh UUID v4. The id is recorded on the tracing
//! span, tagged on the Sentry scope, and echoed in the response headers so
//! a shopper-reported failure can be matched to its log lines.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

fn incoming_or_fresh_id(request: &Request) -> String {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|id| !id.is_empty())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from)
}

/// Middleware that ensures every request carries a request id.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = incoming_or_fresh_id(&request);

    Span::current().record("request_id", request_id.as_str());

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    // Echo back so the browser storefront can surface it with failures
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;

    fn request_with_header(value: &str) -> Request {
        Request::builder()
            .header(REQUEST_ID_HEADER, value)
            .body(Body::empty())
            .expect("request")
    }

    #[test]
    fn test_incoming_id_is_kept() {
        let request = request_with_header("edge-abc-123");
        assert_eq!(incoming_or_fresh_id(&request), "edge-abc-123");
    }

    #[test]
    fn test_missing_or_empty_id_gets_a_fresh_uuid() {
        let bare = Request::builder().body(Body::empty()).expect("request");
        let id = incoming_or_fresh_id(&bare);
        assert!(Uuid::parse_str(&id).is_ok());

        let empty = request_with_header("");
        assert!(Uuid::parse_str(&incoming_or_fresh_id(&empty)).is_ok());
    }
}
