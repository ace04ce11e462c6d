//! Generic HTTP client tools
//!
//! The request flow shared by every resource: send once, log, read the body.
//! Status classification is left to the caller, which knows the operation.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;
use crate::utils::log_sanitizer::truncate_for_log;

/// Body members checked, in order, for a structured error message.
const MESSAGE_KEYS: [&str; 3] = ["message", "error", "detail"];

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns status code and response text.
    ///
    /// Only network-level failures become errors here; every HTTP status,
    /// including non-2xx, is returned to the caller.
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, headers, body)
    /// * `resource` - resource name (for logging and errors)
    /// * `method_name` - request method name (for logging)
    /// * `url` - request URL (for logging)
    pub async fn execute_request(
        request_builder: RequestBuilder,
        resource: &str,
        method_name: &str,
        url: &str,
    ) -> Result<(u16, String), ClientError> {
        log::debug!("[{resource}] {method_name} {url}");

        let response = request_builder
            .send()
            .await
            .map_err(|e| ClientError::Transport {
                resource: resource.to_string(),
                detail: e.to_string(),
            })?;

        let status_code = response.status().as_u16();
        log::debug!("[{resource}] Response Status: {status_code}");

        let response_text = response
            .text()
            .await
            .map_err(|e| ClientError::Transport {
                resource: resource.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{resource}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse JSON response
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(ClientError::Parse)` - parsing failed
    pub fn parse_json<T>(response_text: &str, resource: &str) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{resource}] JSON parse failed: {e}");
            log::error!(
                "[{resource}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ClientError::Parse {
                resource: resource.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// Pull a structured message out of an error body.
    ///
    /// Recognizes a JSON object with a non-empty `message`, `error` or
    /// `detail` string member. Anything else is unstructured.
    pub fn extract_message(body: &str) -> Option<String> {
        let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) else {
            return None;
        };
        MESSAGE_KEYS.iter().find_map(|key| match map.get(*key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        })
    }

    /// Whether a status code counts as success.
    pub fn is_success(status: u16) -> bool {
        (200..300).contains(&status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- parse_json ----

    #[test]
    fn parse_json_valid() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Foo {
            x: i32,
        }
        let result: Result<Foo, ClientError> = HttpUtils::parse_json(r#"{"x":42}"#, "test");
        assert!(
            matches!(&result, Ok(Foo { x: 42 })),
            "unexpected parse result: {result:?}"
        );
    }

    #[test]
    fn parse_json_invalid() {
        let result: Result<Value, ClientError> = HttpUtils::parse_json("not json", "test");
        assert!(
            matches!(&result, Err(ClientError::Parse { .. })),
            "unexpected parse result: {result:?}"
        );
    }

    // ---- extract_message ----

    #[test]
    fn extract_message_prefers_message_member() {
        let body = r#"{"error":"E_DUP","message":"Duplicate code"}"#;
        assert_eq!(
            HttpUtils::extract_message(body).as_deref(),
            Some("Duplicate code")
        );
    }

    #[test]
    fn extract_message_falls_back_to_error_and_detail() {
        assert_eq!(
            HttpUtils::extract_message(r#"{"error":"nope"}"#).as_deref(),
            Some("nope")
        );
        assert_eq!(
            HttpUtils::extract_message(r#"{"detail":"gone"}"#).as_deref(),
            Some("gone")
        );
    }

    #[test]
    fn extract_message_ignores_unstructured_bodies() {
        assert_eq!(HttpUtils::extract_message(""), None);
        assert_eq!(HttpUtils::extract_message("Internal Server Error"), None);
        assert_eq!(HttpUtils::extract_message(r#"["message"]"#), None);
        assert_eq!(HttpUtils::extract_message(r#"{"message":"  "}"#), None);
        assert_eq!(HttpUtils::extract_message(r#"{"message":12}"#), None);
    }

    #[test]
    fn success_range() {
        assert!(HttpUtils::is_success(200));
        assert!(HttpUtils::is_success(204));
        assert!(!HttpUtils::is_success(304));
        assert!(!HttpUtils::is_success(404));
    }
}
