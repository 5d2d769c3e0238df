// API response utility functions module

use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::types::ErrorResponse;

/// Build JSON response
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", "application/json")
                .body(Full::new(Bytes::from(
                    r#"{"error":"Internal server error"}"#,
                )))
                .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Error"))));
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build response: {e}"));
            Response::new(Full::new(Bytes::from("Error")))
        })
}

/// 404 Not Found carrying the structured error body
pub fn not_found(body: &ErrorResponse) -> Response<Full<Bytes>> {
    json_response(StatusCode::NOT_FOUND, body)
}

/// 400 Bad Request with the bare string detail
///
/// The body is the JSON string `"Bad Request"`, not a structured object.
pub fn bad_request() -> Response<Full<Bytes>> {
    json_response(StatusCode::BAD_REQUEST, &"Bad Request")
}

/// 422 for bodies or parameters that fail to deserialize
pub fn unprocessable_entity(detail: &str) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        &serde_json::json!({ "detail": detail }),
    )
}

/// 404 for paths outside the API surface
pub fn route_not_found() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::NOT_FOUND,
        &serde_json::json!({ "detail": "Not Found" }),
    )
}

/// 405 for known paths hit with an unsupported method
pub fn method_not_allowed() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::METHOD_NOT_ALLOWED,
        &serde_json::json!({ "detail": "Method Not Allowed" }),
    )
}

/// 400 for request bodies that could not be read off the wire
pub fn body_read_error() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::BAD_REQUEST,
        &serde_json::json!({ "detail": "Failed to read request body" }),
    )
}

/// 413 Payload Too Large response
pub fn payload_too_large() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::PAYLOAD_TOO_LARGE,
        &serde_json::json!({ "detail": "Payload Too Large" }),
    )
}
