//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers return `Result<T, AppError>`;
//! responses are JSON `{"error": message}` bodies matching the rest of the
//! API surface.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::content::ContentError;
use crate::shopify::ShopifyError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Shopify API operation failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] ShopifyError),

    /// CMS operation failed.
    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether this error indicates a server-side failure worth reporting,
    /// as opposed to a client mistake or an expected business rejection.
    fn is_reportable(&self) -> bool {
        match self {
            Self::Internal(_) | Self::Content(_) => true,
            Self::Shopify(err) => !matches!(
                err,
                ShopifyError::NotFound(_) | ShopifyError::UserError(_)
            ),
            Self::NotFound(_) | Self::BadRequest(_) => false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_reportable() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Shopify(err) => match err {
                // Expired or unknown resources map straight to 404
                ShopifyError::NotFound(_) => StatusCode::NOT_FOUND,
                // Business-rule rejections are the caller's problem
                ShopifyError::UserError(_) => StatusCode::BAD_REQUEST,
                ShopifyError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::Content(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients; user errors are
        // shopper-facing and pass through verbatim
        let message = match &self {
            Self::Shopify(err) => match err {
                ShopifyError::NotFound(msg) => msg.clone(),
                ShopifyError::UserError(msg) => msg.clone(),
                ShopifyError::RateLimited(_) => "Too many requests, try again shortly".to_string(),
                _ => "External service error".to_string(),
            },
            Self::Content(_) => "External service error".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
            Self::NotFound(msg) => msg.clone(),
            Self::BadRequest(msg) => msg.clone(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product-123".to_string());
        assert_eq!(err.to_string(), "Not found: product-123");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            status_of(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_shopify_error_status_mapping() {
        assert_eq!(
            status_of(AppError::Shopify(ShopifyError::NotFound("cart".to_string()))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Shopify(ShopifyError::UserError(
                "Out of stock".to_string()
            ))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Shopify(ShopifyError::RateLimited(5))),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            status_of(AppError::Shopify(ShopifyError::GraphQL(vec![]))),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_user_errors_are_not_reportable() {
        assert!(!AppError::Shopify(ShopifyError::UserError("msg".to_string())).is_reportable());
        assert!(!AppError::NotFound("x".to_string()).is_reportable());
        assert!(AppError::Internal("x".to_string()).is_reportable());
        assert!(AppError::Shopify(ShopifyError::GraphQL(vec![])).is_reportable());
    }
}
