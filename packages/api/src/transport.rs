//! # Transport: the single configured HTTP client
//!
//! Every accessor in this crate funnels through one [`Transport`]. A request is
//! described by an [`ApiRequest`] (method, path, query, optional JSON body, per-call
//! headers) and answered with the decoded JSON body or a [`TransportError`].
//!
//! [`HttpTransport`] is the production implementation over `reqwest`. Base URL and
//! timeout are fixed at construction from [`ClientConfig`]. Each call is logged
//! (method, target, outcome) through `tracing`; logging never changes the result.
//!
//! ## Status mapping
//!
//! | Outcome | Result |
//! |---------|--------|
//! | 2xx, empty body | `Ok(Value::Null)` |
//! | 2xx, JSON body | `Ok(value)` |
//! | 2xx, non-JSON body | `Err(Unknown)` |
//! | non-2xx | `Err(HttpStatus { status, body })` |
//! | request exceeded the timeout | `Err(Timeout)` |
//! | connection could not be made | `Err(NetworkUnreachable)` |

use std::fmt;
use std::future::Future;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::TransportError;

/// HTTP verbs used by the content API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// Whether the call mutates server state.
    pub fn is_write(&self) -> bool {
        !matches!(self, Method::Get)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One call against the content API, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    /// Create a request. Write methods always carry `Content-Type: application/json`.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let headers = if method.is_write() {
            vec![(CONTENT_TYPE.as_str().to_string(), "application/json".to_string())]
        } else {
            Vec::new()
        };
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Append a query parameter.
    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Attach a JSON body.
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, TransportError> {
        let value = serde_json::to_value(body)
            .map_err(|e| TransportError::Unknown(format!("failed to encode body: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    /// Attach `Authorization: Bearer <token>`.
    pub fn with_bearer(self, token: &str) -> Self {
        self.with_header(AUTHORIZATION.as_str(), format!("Bearer {token}"))
    }

    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Path plus URL-encoded query string, e.g. `/blog?page=1&limit=10`.
    pub fn target(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        format!("{}?{}", self.path, query)
    }
}

/// Percent-encode one path segment (ids, slugs, tags).
pub fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Async interface for issuing API calls.
pub trait Transport {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<Value, TransportError>>;
}

/// `reqwest`-backed Transport.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    /// Build a transport for the given base URL. Every request carries the fixed timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError::Unknown(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(client, config))
    }

    /// Wrap an existing client. The timeout is still applied per request.
    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        tracing::info!("API base URL: {}", config.api.base_url);
        Self {
            client,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            timeout: config.api.timeout(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn url_for(&self, request: &ApiRequest) -> String {
        format!("{}{}", self.base_url, request.target())
    }

    /// The `reqwest` request for `request`, bounded by the fixed timeout.
    fn build(&self, request: &ApiRequest) -> reqwest::RequestBuilder {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self
            .client
            .request(method, self.url_for(request))
            .timeout(self.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        builder
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, TransportError> {
        tracing::debug!("Making {} request to: {}", request.method, self.url_for(&request));

        let response = self.build(&request).send().await.map_err(|e| {
            let err = map_reqwest_error(&e);
            log_failure(&request, &err);
            err
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            let err = map_reqwest_error(&e);
            log_failure(&request, &err);
            err
        })?;

        if !status.is_success() {
            let err = TransportError::HttpStatus {
                status: status.as_u16(),
                body: text,
            };
            log_failure(&request, &err);
            return Err(err);
        }

        tracing::debug!("{} {} -> {}", request.method, request.target(), status.as_u16());
        decode_body(&text)
    }
}

/// Decode a successful response body; empty bodies are `null`.
pub(crate) fn decode_body(text: &str) -> Result<Value, TransportError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text)
        .map_err(|e| TransportError::Unknown(format!("response is not valid JSON: {e}")))
}

fn map_reqwest_error(e: &reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if is_connect_error(e) {
        TransportError::NetworkUnreachable(e.to_string())
    } else {
        TransportError::Unknown(e.to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn is_connect_error(e: &reqwest::Error) -> bool {
    e.is_connect()
}

#[cfg(target_arch = "wasm32")]
fn is_connect_error(e: &reqwest::Error) -> bool {
    e.is_request()
}

fn log_failure(request: &ApiRequest, err: &TransportError) {
    match err {
        TransportError::Timeout => {
            tracing::error!("{} {}: request timeout", request.method, request.target())
        }
        TransportError::NetworkUnreachable(detail) => tracing::error!(
            "{} {}: no response received, check that the backend is running ({})",
            request.method,
            request.target(),
            detail
        ),
        TransportError::HttpStatus { status, body } => tracing::warn!(
            "{} {}: response error {} {}",
            request.method,
            request.target(),
            status,
            body
        ),
        TransportError::Unknown(detail) => {
            tracing::error!("{} {}: {}", request.method, request.target(), detail)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::REQUEST_TIMEOUT_MS;

    #[test]
    fn test_write_requests_default_to_json_content_type() {
        for request in [
            ApiRequest::post("/contact"),
            ApiRequest::put("/admin/blog/1"),
            ApiRequest::delete("/admin/blog/1"),
        ] {
            assert_eq!(request.header("content-type"), Some("application/json"));
        }
        assert_eq!(ApiRequest::get("/health").header("content-type"), None);
    }

    #[test]
    fn test_target_encodes_query() {
        let request = ApiRequest::get("/blog").with_query("page", 1).with_query("limit", 10);
        assert_eq!(request.target(), "/blog?page=1&limit=10");

        let request = ApiRequest::get("/projects").with_query("category", "web dev&co");
        assert_eq!(request.target(), "/projects?category=web+dev%26co");
    }

    #[test]
    fn test_bearer_header() {
        let request = ApiRequest::get("/auth/me").with_bearer("abc");
        assert_eq!(request.header("Authorization"), Some("Bearer abc"));
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("hello-world"), "hello-world");
        assert_eq!(encode_segment("a b/c"), "a%20b%2Fc");
    }

    #[test]
    fn test_decode_body() {
        assert_eq!(decode_body("").unwrap(), Value::Null);
        assert_eq!(decode_body("{\"success\":true}").unwrap()["success"], true);
        assert!(matches!(decode_body("<html>"), Err(TransportError::Unknown(_))));
    }

    #[test]
    fn test_every_request_carries_timeout() {
        let transport = HttpTransport::new(&ClientConfig::new("http://api.test")).unwrap();
        for request in [
            ApiRequest::get("/health"),
            ApiRequest::post("/contact").with_json(&serde_json::json!({ "name": "Ada" })).unwrap(),
            ApiRequest::delete("/admin/blog/1").with_bearer("jwt"),
        ] {
            let built = transport.build(&request).build().unwrap();
            assert_eq!(built.timeout(), Some(&Duration::from_millis(REQUEST_TIMEOUT_MS)));
        }
    }

    #[test]
    fn test_built_request_carries_headers_and_body() {
        let transport = HttpTransport::new(&ClientConfig::new("http://api.test/api")).unwrap();
        let request = ApiRequest::put("/admin/projects/p1")
            .with_bearer("jwt")
            .with_json(&serde_json::json!({ "title": "Site" }))
            .unwrap();

        let built = transport.build(&request).build().unwrap();
        assert_eq!(built.method(), &reqwest::Method::PUT);
        assert_eq!(built.url().as_str(), "http://api.test/api/admin/projects/p1");
        assert_eq!(built.headers()["authorization"], "Bearer jwt");
        assert_eq!(built.headers()["content-type"], "application/json");
        assert!(built.body().is_some());
    }

    #[test]
    fn test_http_transport_trims_trailing_slash() {
        let transport = HttpTransport::new(&ClientConfig::new("http://api.test/api/")).unwrap();
        assert_eq!(transport.base_url(), "http://api.test/api");
        let request = ApiRequest::get("/blog").with_query("page", 2);
        assert_eq!(transport.url_for(&request), "http://api.test/api/blog?page=2");
    }
}
