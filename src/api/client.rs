//! Request preparation and response interpretation.
//!
//! A plugin cannot await a response, so the `request(path, options)` contract
//! is split into two synchronous halves. [`ApiClient::prepare`] produces
//! everything `web_request` needs; [`ApiClient::interpret`] turns whatever
//! came back into either a JSON value or an [`ApiError`].

use super::request::{ApiRequest, HttpMethod, RequestOptions};
use crate::domain::{ApiError, Result};
use serde_json::Value;
use std::collections::BTreeMap;

/// Compiled-in default for the registry API root.
pub const API_BASE_URL: &str = "http://localhost:3000/api";

const CONTENT_TYPE: &str = "Content-Type";
const JSON_MEDIA_TYPE: &str = "application/json";
const NO_CONTENT: u16 = 204;
const TRANSPORT_FAILURE_FALLBACK: &str = "Failed to fetch";

/// A request with its URL resolved and headers merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    /// Correlation data echoed back with the response.
    pub context: BTreeMap<String, String>,
}

/// What the host handed back for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawResponse {
    /// The server answered, with any status.
    Received { status: u16, body: Vec<u8> },
    /// No response reached the plugin.
    TransportFailed { message: String },
}

impl RawResponse {
    /// Classifies a `WebRequestResult` payload.
    ///
    /// Zellij reports a failed fetch as status 400 with no headers and the
    /// error text as the body. A real 400 from the server always carries
    /// headers, and the registry answers errors in JSON, so the combination
    /// identifies a transport failure.
    ///
    /// # Parameters
    ///
    /// * `status` - HTTP status as reported by the host
    /// * `headers` - Response headers (empty when no response arrived)
    /// * `body` - Raw response body
    #[must_use]
    pub fn from_web_result(status: u16, headers: &BTreeMap<String, String>, body: Vec<u8>) -> Self {
        let is_json = serde_json::from_slice::<Value>(&body).is_ok();
        if status == 400 && headers.is_empty() && !is_json {
            let message = String::from_utf8_lossy(&body).trim().to_string();
            let message = if message.is_empty() {
                TRANSPORT_FAILURE_FALLBACK.to_string()
            } else {
                message
            };
            return Self::TransportFailed { message };
        }
        Self::Received { status, body }
    }
}

/// Thin wrapper over the registry REST API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(API_BASE_URL)
    }
}

impl ApiClient {
    /// Creates a client rooted at `base_url`. A trailing slash is dropped.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves `path` against the base URL and merges headers.
    ///
    /// The default `Content-Type: application/json` is applied first and the
    /// caller's headers on top, so the caller wins on conflicts.
    ///
    /// # Parameters
    ///
    /// * `path` - Path relative to the base URL, starting with `/`
    /// * `options` - Method, extra headers and body
    ///
    /// # Returns
    ///
    /// A [`PreparedRequest`] with an empty context.
    ///
    /// ```
    /// use patient_registry::api::{ApiClient, HttpMethod, RequestOptions};
    ///
    /// let client = ApiClient::new("http://localhost:3000/api");
    /// let prepared = client.prepare("/pacientes", &RequestOptions::new(HttpMethod::Get));
    /// assert_eq!(prepared.url, "http://localhost:3000/api/pacientes");
    /// assert_eq!(prepared.headers["Content-Type"], "application/json");
    /// ```
    #[must_use]
    pub fn prepare(&self, path: &str, options: &RequestOptions) -> PreparedRequest {
        let mut headers = BTreeMap::from([(CONTENT_TYPE.to_string(), JSON_MEDIA_TYPE.to_string())]);
        headers.extend(options.headers.clone());

        PreparedRequest {
            url: format!("{}{}", self.base_url, path),
            method: options.method,
            headers,
            body: options.body.clone().map(String::into_bytes).unwrap_or_default(),
            context: BTreeMap::new(),
        }
    }

    /// Prepares a typed request, attaching its correlation context.
    ///
    /// # Errors
    ///
    /// Returns an error if the request tag cannot be serialized.
    pub fn prepare_request(&self, request: &ApiRequest) -> Result<PreparedRequest> {
        let mut prepared = self.prepare(&request.path, &request.options);
        prepared.context = request.context()?;
        Ok(prepared)
    }

    /// Interprets a response.
    ///
    /// # Parameters
    ///
    /// * `response` - What the host handed back, already classified
    ///
    /// # Returns
    ///
    /// - 204, or a 2xx with an empty body, yields `Ok(None)`.
    /// - Any other 2xx must be JSON and yields `Ok(Some(value))`.
    /// - A non-2xx yields the body's `error` field as the message when
    ///   present, else `HTTP error! status: <code>`.
    /// - A transport failure yields its message.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for every failure case above, and for a 2xx body
    /// that is not valid JSON.
    pub fn interpret(response: RawResponse) -> std::result::Result<Option<Value>, ApiError> {
        let (status, body) = match response {
            RawResponse::TransportFailed { message } => return Err(ApiError::transport(message)),
            RawResponse::Received { status, body } => (status, body),
        };

        if !(200..300).contains(&status) {
            return Err(ApiError::http(status, error_message(status, &body)));
        }

        if status == NO_CONTENT || body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| ApiError::http(status, format!("Invalid JSON response: {e}")))
    }
}

fn error_message(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| value.get("error").cloned())
        .and_then(|error| match error {
            Value::Null | Value::Bool(false) => None,
            Value::String(text) if text.is_empty() => None,
            Value::String(text) => Some(text),
            other => Some(other.to_string()),
        })
        .unwrap_or_else(|| format!("HTTP error! status: {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn received(status: u16, body: &str) -> RawResponse {
        RawResponse::Received {
            status,
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_caller_headers_win() {
        let client = ApiClient::new("http://api/");
        let mut options = RequestOptions::new(HttpMethod::Post);
        options.headers.insert("Content-Type".into(), "text/plain".into());
        options.headers.insert("X-Trace".into(), "1".into());

        let prepared = client.prepare("/pacientes", &options);
        assert_eq!(prepared.url, "http://api/pacientes");
        assert_eq!(prepared.headers["Content-Type"], "text/plain");
        assert_eq!(prepared.headers["X-Trace"], "1");
        assert_eq!(prepared.headers.len(), 2);
    }

    #[test]
    fn test_prepare_request_carries_body_and_context() {
        let client = ApiClient::default();
        let prepared = client.prepare_request(&ApiRequest::delete_patient(5)).unwrap();
        assert_eq!(prepared.url, "http://localhost:3000/api/pacientes/5");
        assert_eq!(prepared.method, HttpMethod::Delete);
        assert!(prepared.body.is_empty());
        assert!(prepared.context.contains_key("request"));
    }

    #[test]
    fn test_no_content_is_none() {
        assert_eq!(ApiClient::interpret(received(204, "")), Ok(None));
        assert_eq!(ApiClient::interpret(received(200, "  ")), Ok(None));
    }

    #[test]
    fn test_success_parses_json() {
        let value = ApiClient::interpret(received(200, r#"[{"id_pessoa":1}]"#)).unwrap();
        assert_eq!(value, Some(serde_json::json!([{"id_pessoa": 1}])));
    }

    #[test]
    fn test_success_with_invalid_json_fails() {
        let err = ApiClient::interpret(received(200, "<html>")).unwrap_err();
        assert_eq!(err.status, Some(200));
    }

    #[test]
    fn test_error_field_becomes_message() {
        let err = ApiClient::interpret(received(409, r#"{"error":"CPF já cadastrado"}"#)).unwrap_err();
        assert_eq!(err.message, "CPF já cadastrado");
        assert_eq!(err.status, Some(409));
    }

    #[test]
    fn test_error_fallback_message() {
        let err = ApiClient::interpret(received(500, "Internal Server Error")).unwrap_err();
        assert_eq!(err.message, "HTTP error! status: 500");

        let err = ApiClient::interpret(received(404, r#"{"message":"nope"}"#)).unwrap_err();
        assert_eq!(err.message, "HTTP error! status: 404");
    }

    #[test]
    fn test_transport_failure_detection() {
        let raw = RawResponse::from_web_result(400, &BTreeMap::new(), b"connection refused".to_vec());
        assert_eq!(
            raw,
            RawResponse::TransportFailed {
                message: "connection refused".into()
            }
        );
        let err = ApiClient::interpret(raw).unwrap_err();
        assert_eq!(err.status, None);
        assert_eq!(err.message, "connection refused");
    }

    #[test]
    fn test_real_bad_request_is_not_transport_failure() {
        let headers = BTreeMap::from([("content-type".to_string(), "application/json".to_string())]);
        let raw = RawResponse::from_web_result(400, &headers, r#"{"error":"CPF inválido"}"#.as_bytes().to_vec());
        let err = ApiClient::interpret(raw).unwrap_err();
        assert_eq!(err.status, Some(400));
        assert_eq!(err.message, "CPF inválido");

        let raw = RawResponse::from_web_result(400, &BTreeMap::new(), br#"{"error":"x"}"#.to_vec());
        assert!(matches!(raw, RawResponse::Received { status: 400, .. }));
    }

    #[test]
    fn test_empty_transport_failure_gets_fallback() {
        let raw = RawResponse::from_web_result(400, &BTreeMap::new(), Vec::new());
        assert_eq!(
            raw,
            RawResponse::TransportFailed {
                message: "Failed to fetch".into()
            }
        );
    }
}
