// Order endpoint handlers module
//
// Orders mirror the product endpoints but with three deliberate contract
// differences: creation answers 200 (not 201), updates require the id to
// exist, and search filters with falsy values (0, "") are ignored.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::query::Query;
use super::response;
use super::types::{CreatedId, ErrorResponse};
use crate::config::AppState;
use crate::store::Order;

/// GET /orders/{id}
///
/// The 404 body carries no message field at all.
pub async fn get(state: &AppState, id: i64, path: &str) -> Response<Full<Bytes>> {
    let orders = state.orders.read().await;
    match orders.get(id) {
        Some(order) => response::json_response(StatusCode::OK, order),
        None => {
            let body = ErrorResponse::not_found(path, None);
            response::not_found(&body)
        }
    }
}

/// POST /orders
pub async fn create(state: &AppState, body: &Bytes) -> Response<Full<Bytes>> {
    let order: Order = match serde_json::from_slice(body) {
        Ok(order) => order,
        Err(e) => return response::unprocessable_entity(&e.to_string()),
    };

    let mut orders = state.orders.write().await;
    let id = orders.create(order);
    response::json_response(StatusCode::OK, &CreatedId { id })
}

/// POST /orders/{id}
///
/// Unlike products, updating a missing order is rejected with 400.
pub async fn update(state: &AppState, id: i64, body: &Bytes) -> Response<Full<Bytes>> {
    let order: Order = match serde_json::from_slice(body) {
        Ok(order) => order,
        Err(e) => return response::unprocessable_entity(&e.to_string()),
    };

    let mut orders = state.orders.write().await;
    if orders.update(id, order) {
        response::json_response(StatusCode::OK, &"")
    } else {
        response::bad_request()
    }
}

/// DELETE /orders/{id}
///
/// A missing id answers 400 with the bare string detail, not 404.
pub async fn delete(state: &AppState, id: i64) -> Response<Full<Bytes>> {
    let mut orders = state.orders.write().await;
    if orders.remove(id) {
        response::json_response(StatusCode::OK, &"")
    } else {
        response::bad_request()
    }
}

/// GET /orders?productid&status
///
/// A productid of 0 and an empty status disable their filters; callers rely
/// on this, so `productid=0` is indistinguishable from no filter.
pub async fn search(state: &AppState, query: &Query) -> Response<Full<Bytes>> {
    let productid = match query.get("productid").filter(|v| !v.is_empty()) {
        Some(raw) => match raw.parse::<i64>() {
            Ok(value) => Some(value),
            Err(_) => return response::unprocessable_entity("productid must be an integer"),
        },
        None => None,
    };
    let productid = productid.filter(|value| *value != 0);
    let status = query.get("status").filter(|v| !v.is_empty());

    let orders = state.orders.read().await;
    let matches = orders.search(productid, status);
    response::json_response(StatusCode::OK, &matches)
}
