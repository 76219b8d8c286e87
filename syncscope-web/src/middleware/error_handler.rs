use axum::{
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::errors::{ErrorLogged, WebError};

/// Log every response that leaves with a server error status, unless the
/// handler already logged it
pub async fn error_handler_middleware(request: Request<axum::body::Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;

    if needs_logging(&response) {
        error!(%method, %uri, status = %response.status(), "Server error occurred");
    }

    response
}

fn needs_logging(response: &Response) -> bool {
    response.status().is_server_error() && response.extensions().get::<ErrorLogged>().is_none()
}

/// Fallback for unknown routes
pub async fn handle_not_found() -> impl IntoResponse {
    WebError::not_found("The requested resource was not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::{middleware, routing::get, Router};
    use tower::ServiceExt;

    fn server_error(logged: bool) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        if logged {
            response.extensions_mut().insert(ErrorLogged);
        }
        response
    }

    fn app() -> Router {
        Router::new()
            .route("/error", get(|| async { server_error(false) }))
            .fallback(handle_not_found)
            .layer(middleware::from_fn(error_handler_middleware))
    }

    #[test]
    fn test_only_unlogged_server_errors_are_logged() {
        assert!(needs_logging(&server_error(false)));
        assert!(!needs_logging(&server_error(true)));
        assert!(!needs_logging(&StatusCode::NOT_FOUND.into_response()));
        assert!(!needs_logging(&StatusCode::OK.into_response()));
    }

    #[tokio::test]
    async fn test_server_error_passes_through() {
        let request = Request::builder().uri("/error").body(axum::body::Body::empty()).unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_not_found_fallback() {
        let request = Request::builder().uri("/nope").body(axum::body::Body::empty()).unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["status"], 404);
    }
}
