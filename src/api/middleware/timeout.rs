//! Request deadlines.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tower_http::timeout::{RequestBodyTimeoutLayer, TimeoutLayer};

use crate::error::AppError;

/// Fails requests whose body is not fully received within `read_timeout`.
pub fn read_layer(read_timeout: Duration) -> RequestBodyTimeoutLayer {
    RequestBodyTimeoutLayer::new(read_timeout)
}

/// Answers `408 Request Timeout` when a request is not handled within
/// `write_timeout`. The response has no body; see [`error_body`].
pub fn write_layer(write_timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, write_timeout)
}

/// Replaces the empty 408 produced by [`write_layer`] with the usual
/// `{"error": ...}` body. Must sit outside `write_layer`.
pub async fn error_body(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return AppError::request_timeout("request timed out").into_response();
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, middleware, routing::get};
    use axum_test::TestServer;

    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_secs(2)).await;
        "done"
    }

    async fn fast() -> &'static str {
        "done"
    }

    fn test_server() -> TestServer {
        let app = Router::new()
            .route("/slow", get(slow))
            .route("/fast", get(fast))
            .layer(write_layer(Duration::from_millis(50)))
            .layer(middleware::map_response(error_body));

        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_slow_request_times_out_with_json_body() {
        let server = test_server();

        let response = server.get("/slow").await;

        response.assert_status(StatusCode::REQUEST_TIMEOUT);
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["error"], "request timed out");
    }

    #[tokio::test]
    async fn test_fast_request_is_untouched() {
        let server = test_server();

        let response = server.get("/fast").await;

        response.assert_status_ok();
        response.assert_text("done");
    }
}
