// API module entry
// Routes product and order requests to their endpoint handlers

mod orders;
mod products;
mod query;
mod response;
mod types;

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

use crate::config::AppState;
use crate::logger;
use query::Query;

/// Main entry point for HTTP request handling
///
/// Dispatches to handler functions based on request path and method, then
/// writes one access log line per request.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: hyper::body::Body,
    B::Error: std::fmt::Display,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        resp
    } else {
        route(req, &state).await
    };

    if state.config.logging.access_log {
        logger::log_access(method.as_str(), &path, response.status().as_u16());
    }

    Ok(response)
}

/// Dispatch on method and path
async fn route<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: hyper::body::Body,
    B::Error: std::fmt::Display,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = Query::parse(req.uri().query());

    match (&method, path.as_str()) {
        (&Method::GET, "/products") => products::search(state, &query).await,
        (&Method::POST, "/products") => match read_body(req).await {
            Ok(body) => products::create(state, &body).await,
            Err(resp) => resp,
        },
        (&Method::GET, "/orders") => orders::search(state, &query).await,
        (&Method::POST, "/orders") => match read_body(req).await {
            Ok(body) => orders::create(state, &body).await,
            Err(resp) => resp,
        },
        (_, "/products" | "/orders") => response::method_not_allowed(),
        _ => route_item(req, state, &method, &path).await,
    }
}

/// Dispatch /products/{id} and /orders/{id} routes
async fn route_item<B>(
    req: Request<B>,
    state: &AppState,
    method: &Method,
    path: &str,
) -> Response<Full<Bytes>>
where
    B: hyper::body::Body,
    B::Error: std::fmt::Display,
{
    if let Some(raw) = item_id(path, "/products/") {
        let Ok(id) = raw.parse::<i64>() else {
            return response::unprocessable_entity("id must be an integer");
        };
        return match *method {
            Method::GET => products::get(state, id, path).await,
            Method::POST => match read_body(req).await {
                Ok(body) => products::update(state, id, &body).await,
                Err(resp) => resp,
            },
            Method::DELETE => products::delete(state, id).await,
            _ => response::method_not_allowed(),
        };
    }

    if let Some(raw) = item_id(path, "/orders/") {
        let Ok(id) = raw.parse::<i64>() else {
            return response::unprocessable_entity("id must be an integer");
        };
        return match *method {
            Method::GET => orders::get(state, id, path).await,
            Method::POST => match read_body(req).await {
                Ok(body) => orders::update(state, id, &body).await,
                Err(resp) => resp,
            },
            Method::DELETE => orders::delete(state, id).await,
            _ => response::method_not_allowed(),
        };
    }

    response::route_not_found()
}

/// Extract the single trailing path segment after `prefix`
fn item_id<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() || rest.contains('/') {
        return None;
    }
    Some(rest)
}

/// Collect the request body into memory
async fn read_body<B>(req: Request<B>) -> Result<Bytes, Response<Full<Bytes>>>
where
    B: hyper::body::Body,
    B::Error: std::fmt::Display,
{
    match req.collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) => {
            logger::log_error(&format!("Failed to read request body: {e}"));
            Err(response::body_read_error())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(response::payload_too_large())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::StatusCode;

    const HAMMER: &str = r#"{"name":"hammer","type":"tool","inventory":5,"cost":9.5}"#;
    const SAW: &str = r#"{"name":"saw","type":"tool","inventory":3,"cost":14.0}"#;
    const ORDER: &str = r#"{"productid":1,"count":2,"status":"placed"}"#;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::for_tests())
    }

    fn request(method: Method, uri: &str, body: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap()
    }

    async fn send(
        state: &Arc<AppState>,
        method: Method,
        uri: &str,
        body: &str,
    ) -> (StatusCode, String) {
        let response = handle_request(request(method, uri, body), Arc::clone(state))
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn test_item_id_extraction() {
        assert_eq!(item_id("/products/3", "/products/"), Some("3"));
        assert_eq!(item_id("/products/", "/products/"), None);
        assert_eq!(item_id("/products/3/extra", "/products/"), None);
        assert_eq!(item_id("/orders/3", "/products/"), None);
    }

    #[tokio::test]
    async fn test_product_round_trip() {
        let state = test_state();

        let (status, body) = send(&state, Method::POST, "/products", HAMMER).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, r#"{"id":0}"#);

        let (status, body) = send(&state, Method::GET, "/products/0", "").await;
        assert_eq!(status, StatusCode::OK);
        let product: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(product["id"], 0);
        assert_eq!(product["name"], "hammer");
        assert_eq!(product["type"], "tool");
        assert_eq!(product["inventory"], 5);
        assert_eq!(product["cost"], 9.5);
    }

    #[tokio::test]
    async fn test_product_ids_reuse_lowest_free_slot() {
        let state = test_state();
        for body in [HAMMER, SAW, HAMMER] {
            send(&state, Method::POST, "/products", body).await;
        }

        let (status, _) = send(&state, Method::DELETE, "/products/1", "").await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&state, Method::POST, "/products", SAW).await;
        assert_eq!(body, r#"{"id":1}"#);
    }

    #[tokio::test]
    async fn test_order_ids_are_never_reused() {
        let state = test_state();
        send(&state, Method::POST, "/orders", ORDER).await;
        let (status, body) = send(&state, Method::POST, "/orders", ORDER).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"id":2}"#);

        send(&state, Method::DELETE, "/orders/1", "").await;
        let (_, body) = send(&state, Method::POST, "/orders", ORDER).await;
        assert_eq!(body, r#"{"id":3}"#);
    }

    #[tokio::test]
    async fn test_product_not_found_carries_request_path() {
        let state = test_state();
        let (status, body) = send(&state, Method::GET, "/products/42", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let error: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(error["error"], "Not Found");
        assert_eq!(error["path"], "/products/42");
        assert_eq!(error["message"], "");
        assert!(error["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn test_order_not_found_omits_message() {
        let state = test_state();
        let (status, body) = send(&state, Method::GET, "/orders/42", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let error: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(error.get("message").is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_is_400_not_404() {
        let state = test_state();

        let (status, body) = send(&state, Method::DELETE, "/products/5", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "\"Bad Request\"");

        let (status, body) = send(&state, Method::DELETE, "/orders/5", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "\"Bad Request\"");
    }

    #[tokio::test]
    async fn test_product_update_creates_missing_record() {
        let state = test_state();
        let (status, body) = send(&state, Method::POST, "/products/7", HAMMER).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "\"success\"");

        let (status, _) = send(&state, Method::GET, "/products/7", "").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_order_update_requires_existing_record() {
        let state = test_state();
        let (status, body) = send(&state, Method::POST, "/orders/7", ORDER).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "\"Bad Request\"");
    }

    #[tokio::test]
    async fn test_product_search_by_name_substring() {
        let state = test_state();
        send(&state, Method::POST, "/products", HAMMER).await;
        send(&state, Method::POST, "/products", SAW).await;

        let (status, body) = send(&state, Method::GET, "/products?name=ham", "").await;
        assert_eq!(status, StatusCode::OK);
        let found: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["name"], "hammer");
    }

    #[tokio::test]
    async fn test_order_search_productid_zero_is_no_filter() {
        let state = test_state();
        send(&state, Method::POST, "/orders", ORDER).await;
        send(
            &state,
            Method::POST,
            "/orders",
            r#"{"productid":2,"count":1,"status":"shipped"}"#,
        )
        .await;

        let (status, body) = send(&state, Method::GET, "/orders?productid=0", "").await;
        assert_eq!(status, StatusCode::OK);
        let found: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let state = test_state();
        let (status, _) = send(&state, Method::GET, "/customers/1", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_wrong_method_is_405() {
        let state = test_state();
        let (status, _) = send(&state, Method::DELETE, "/products", "").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

        let (status, _) = send(&state, Method::PUT, "/orders/1", ORDER).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_non_integer_id_is_422() {
        let state = test_state();
        let (status, _) = send(&state, Method::GET, "/products/abc", "").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_malformed_body_is_422() {
        let state = test_state();
        let (status, _) = send(&state, Method::POST, "/products", "{not json").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_bad_request_does_not_poison_the_store() {
        let state = test_state();
        send(&state, Method::POST, "/products", HAMMER).await;
        send(&state, Method::POST, "/products", "{not json").await;
        send(&state, Method::DELETE, "/products/9", "").await;

        let (status, body) = send(&state, Method::GET, "/products", "").await;
        assert_eq!(status, StatusCode::OK);
        let found: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_oversized_content_length_is_413() {
        let state = test_state();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/products")
            .header("content-length", "999999999999")
            .body(Full::new(Bytes::from(HAMMER)))
            .unwrap();

        let response = handle_request(req, Arc::clone(&state)).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
