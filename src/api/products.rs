// Product endpoint handlers module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::query::Query;
use super::response;
use super::types::{CreatedId, ErrorResponse};
use crate::config::AppState;
use crate::store::Product;

/// GET /products/{id}
pub async fn get(state: &AppState, id: i64, path: &str) -> Response<Full<Bytes>> {
    let products = state.products.read().await;
    match products.get(id) {
        Some(product) => response::json_response(StatusCode::OK, product),
        None => {
            let body = ErrorResponse::not_found(path, Some(String::new()));
            response::not_found(&body)
        }
    }
}

/// POST /products/{id}
///
/// Upsert: an id that was never created is inserted rather than rejected.
/// Returns the literal string "success".
pub async fn update(state: &AppState, id: i64, body: &Bytes) -> Response<Full<Bytes>> {
    let product: Product = match serde_json::from_slice(body) {
        Ok(product) => product,
        Err(e) => return response::unprocessable_entity(&e.to_string()),
    };

    let mut products = state.products.write().await;
    products.upsert(id, product);
    response::json_response(StatusCode::OK, &"success")
}

/// POST /products
pub async fn create(state: &AppState, body: &Bytes) -> Response<Full<Bytes>> {
    let product: Product = match serde_json::from_slice(body) {
        Ok(product) => product,
        Err(e) => return response::unprocessable_entity(&e.to_string()),
    };

    // The free-id scan and the insert share one write lock
    let mut products = state.products.write().await;
    let id = products.create(product);
    response::json_response(StatusCode::CREATED, &CreatedId { id })
}

/// DELETE /products/{id}
///
/// A missing id answers 400 with the bare string detail, not 404.
pub async fn delete(state: &AppState, id: i64) -> Response<Full<Bytes>> {
    let mut products = state.products.write().await;
    if products.remove(id).is_some() {
        response::json_response(StatusCode::OK, &"")
    } else {
        response::bad_request()
    }
}

/// GET /products?name&type
///
/// Empty filter values count as absent.
pub async fn search(state: &AppState, query: &Query) -> Response<Full<Bytes>> {
    let name = query.get("name").filter(|v| !v.is_empty());
    let r#type = query.get("type").filter(|v| !v.is_empty());

    let products = state.products.read().await;
    let matches = products.search(name, r#type);
    response::json_response(StatusCode::OK, &matches)
}
