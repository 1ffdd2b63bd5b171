/// Normalized trigger contract
///
/// The handler consumes a normalized HTTP event (method, query parameters,
/// raw body) and produces a normalized response (status, headers, encoded
/// body). The JSON field names follow the hosting-transport convention:
/// `httpMethod`, `queryStringParameters`, `body` in; `statusCode`,
/// `headers`, `body`, `isBase64Encoded` out.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

fn default_method() -> String {
    "GET".to_string()
}

/// Incoming trigger event
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerEvent {
    /// HTTP method, "GET" when absent
    #[serde(default = "default_method")]
    pub http_method: String,
    /// URL query parameters, empty when absent
    #[serde(default)]
    pub query_string_parameters: HashMap<String, String>,
    /// Raw request body; absent is treated as "{}" on the write path
    #[serde(default)]
    pub body: Option<String>,
}

/// Outgoing trigger response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    /// JSON-encoded response body (empty only for preflight)
    pub body: String,
    /// Always false; every body this service emits is text
    pub is_base64_encoded: bool,
}

impl TriggerResponse {
    /// JSON response with the standard CORS + content-type headers
    pub fn json(status_code: u16, body: &Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
        Self {
            status_code,
            headers,
            body: body.to_string(),
            is_base64_encoded: false,
        }
    }

    /// CORS preflight response: empty body, 24-hour cache
    pub fn preflight() -> Self {
        let mut headers = HashMap::new();
        headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
        headers.insert(
            "Access-Control-Allow-Methods".to_string(),
            "GET, POST, PUT, DELETE, OPTIONS".to_string(),
        );
        headers.insert(
            "Access-Control-Allow-Headers".to_string(),
            "Content-Type".to_string(),
        );
        headers.insert("Access-Control-Max-Age".to_string(), "86400".to_string());
        Self {
            status_code: 200,
            headers,
            body: String::new(),
            is_base64_encoded: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_event_defaults_to_get() {
        let event: TriggerEvent = serde_json::from_value(json!({})).unwrap();
        assert_eq!(event.http_method, "GET");
        assert!(event.query_string_parameters.is_empty());
        assert!(event.body.is_none());
    }

    #[test]
    fn full_event_parses() {
        let event: TriggerEvent = serde_json::from_value(json!({
            "httpMethod": "POST",
            "queryStringParameters": { "project_id": "3" },
            "body": "{\"action\":\"create_project\"}"
        }))
        .unwrap();
        assert_eq!(event.http_method, "POST");
        assert_eq!(event.query_string_parameters["project_id"], "3");
        assert_eq!(event.body.as_deref(), Some("{\"action\":\"create_project\"}"));
    }

    #[test]
    fn response_serializes_transport_field_names() {
        let response = TriggerResponse::json(200, &json!({ "success": true }));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["isBase64Encoded"], false);
        assert_eq!(value["headers"]["Content-Type"], "application/json");
        assert_eq!(value["headers"]["Access-Control-Allow-Origin"], "*");
        assert_eq!(value["body"], "{\"success\":true}");
    }
}
