// API body types module
// JSON shapes shared by the endpoint handlers

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Structured body returned with 404 responses.
///
/// 400 responses deliberately carry a bare string detail instead; the two
/// shapes differ on purpose and callers match on both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub timestamp: String,
    pub status: u16,
    pub error: String,
    /// Omitted from the JSON entirely when not supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub path: String,
}

impl ErrorResponse {
    /// Build a 404 body for the given request path.
    ///
    /// The timestamp is generated at error time.
    pub fn not_found(path: &str, message: Option<String>) -> Self {
        Self {
            timestamp: current_timestamp(),
            status: 404,
            error: "Not Found".to_string(),
            message,
            path: path.to_string(),
        }
    }
}

/// Body returned by the create endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CreatedId {
    pub id: i64,
}

/// Current UTC time as an ISO-8601 string with microsecond precision
pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_with_empty_message() {
        let body = ErrorResponse::not_found("/products/9", Some(String::new()));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["status"], 404);
        assert_eq!(json["error"], "Not Found");
        assert_eq!(json["message"], "");
        assert_eq!(json["path"], "/products/9");
    }

    #[test]
    fn test_error_response_omits_absent_message() {
        let body = ErrorResponse::not_found("/orders/9", None);
        let json = serde_json::to_value(&body).unwrap();

        assert!(json.get("message").is_none());
        assert_eq!(json["path"], "/orders/9");
    }

    #[test]
    fn test_timestamp_is_utc_iso8601() {
        let ts = current_timestamp();
        assert!(ts.ends_with('Z'));
        assert!(ts.contains('T'));
    }
}
