//! Endpoint configuration: the stored description of one outbound call
//! target. Read-only input to the validator and executor; this service
//! never mutates or persists it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The HTTP methods a probe may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Whether a test payload is attached for this method.
    pub fn allows_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

/// One outbound call target, as stored by the owning CRUD layer.
///
/// The caller is responsible for authorization; by the time a config
/// reaches this service it is trusted input, except for its network
/// target which the SSRF guard re-checks on every invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointConfig {
    /// Absolute http/https URL. Validated by the guard, not here.
    pub base_url: String,

    pub method: HttpMethod,

    /// Extra request headers. Override the default `Content-Type` on
    /// key collision.
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Query parameters appended to the base URL.
    #[serde(default)]
    pub query_params: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_serde_uppercase() {
        let m: HttpMethod = serde_json::from_str("\"DELETE\"").unwrap();
        assert_eq!(m, HttpMethod::Delete);
        assert_eq!(serde_json::to_string(&HttpMethod::Patch).unwrap(), "\"PATCH\"");
    }

    #[test]
    fn test_body_bearing_methods() {
        assert!(HttpMethod::Post.allows_body());
        assert!(HttpMethod::Put.allows_body());
        assert!(HttpMethod::Patch.allows_body());
        assert!(!HttpMethod::Get.allows_body());
        assert!(!HttpMethod::Delete.allows_body());
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: EndpointConfig = serde_json::from_str(
            r#"{"baseUrl": "https://api.example.com/v1", "method": "GET"}"#,
        )
        .unwrap();
        assert!(config.headers.is_empty());
        assert!(config.query_params.is_empty());
    }
}
