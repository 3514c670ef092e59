//! HTTP Client Wrapper
//!
//! One request per call, no retries, no timeout, no caching. Non-success
//! statuses and unparsable bodies are folded into [`RequestError`] so every
//! caller sees a single [`Outcome`] shape.
//!
//! # Design
//!
//! The network sits behind the [`Transport`] trait. [`ReqwestTransport`] is
//! the real implementation; tests plug in a scripted fake. [`ApiClient`]
//! owns the base URL and the status/JSON normalization, which is the same
//! for every transport.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::RequestError;

/// Result of one call through [`ApiClient::request`]
pub type Outcome = Result<Value, RequestError>;

/// HTTP method used by the endpoint actions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    /// GET
    #[default]
    Get,
    /// POST
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// Optional per-request settings (method, headers, body)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestOptions {
    /// Method (defaults to GET)
    pub method: Method,
    /// Extra request headers
    pub headers: Vec<(String, String)>,
    /// Raw request body
    pub body: Option<String>,
}

impl RequestOptions {
    /// A POST carrying `body` serialized as JSON with the matching content type
    #[must_use]
    pub fn post_json(body: &Value) -> Self {
        Self {
            method: Method::Post,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(body.to_string()),
        }
    }
}

/// A fully resolved request handed to a [`Transport`]
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// Method
    pub method: Method,
    /// Absolute URL
    pub url: String,
    /// Request headers
    pub headers: Vec<(String, String)>,
    /// Raw request body
    pub body: Option<String>,
}

/// What came back over the wire, before any interpretation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// Numeric status code
    pub status: u16,
    /// Reason phrase for the status
    pub status_text: String,
    /// Body text (empty when it could not be read on an error status)
    pub body: String,
}

impl HttpResponse {
    /// True for 2xx statuses
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves one request over the network
///
/// Only transport-level failures are errors here; any status code is a
/// valid [`HttpResponse`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform exactly one attempt
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError>;
}

/// [`Transport`] backed by `reqwest`
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with reqwest's defaults (no request timeout)
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Wrap an already configured reqwest client
    #[must_use]
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();

        let body = if status.is_success() {
            response.text().await?
        } else {
            // The error body is decoration for the message; losing it is fine
            response.text().await.unwrap_or_default()
        };

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}

/// Client for the demo backend
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client talking to `base_url` over reqwest
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_transport(base_url, Arc::new(ReqwestTransport::new()))
    }

    /// Create a client over a custom transport
    pub fn with_transport(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
        }
    }

    /// Base URL every relative path is joined onto
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve an absolute or base-relative URL
    #[must_use]
    pub fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_string();
        }
        if url.starts_with('/') {
            format!("{}{}", self.base_url, url)
        } else {
            format!("{}/{}", self.base_url, url)
        }
    }

    /// Perform one request and normalize the result
    ///
    /// # Errors
    ///
    /// - [`RequestError::Transport`] when the request never got a response
    /// - [`RequestError::HttpStatus`] for any non-2xx status
    /// - [`RequestError::Parse`] when a 2xx body is not JSON
    pub async fn request(&self, url: &str, options: RequestOptions) -> Outcome {
        let request = HttpRequest {
            method: options.method,
            url: self.resolve(url),
            headers: options.headers,
            body: options.body,
        };
        tracing::debug!(method = %request.method, url = %request.url, "dispatching request");

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(RequestError::HttpStatus {
                status: response.status,
                status_text: response.status_text,
                body: response.body,
            });
        }

        tracing::debug!(status = response.status, "request succeeded");
        Ok(serde_json::from_str(&response.body)?)
    }

    /// GET `url`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get(&self, url: &str) -> Outcome {
        self.request(url, RequestOptions::default()).await
    }

    /// POST `body` as JSON to `url`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn post_json(&self, url: &str, body: &Value) -> Outcome {
        self.request(url, RequestOptions::post_json(body)).await
    }
}

// ============================================================================
// Test Support
// ============================================================================

/// Scripted in-memory transport for tests
#[cfg(test)]
pub(crate) mod fake {
    use std::collections::VecDeque;
    use std::sync::Arc;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use tokio::sync::Notify;

    use super::{HttpRequest, HttpResponse, Transport};
    use crate::error::RequestError;

    /// Replies with queued responses in order and records every request
    ///
    /// When gated, each `send` waits for [`FakeTransport::open_gate`] before
    /// answering, which lets tests observe the UI mid-flight.
    #[derive(Default)]
    pub struct FakeTransport {
        replies: Mutex<VecDeque<Result<HttpResponse, RequestError>>>,
        requests: Mutex<Vec<HttpRequest>>,
        gate: Option<Arc<Notify>>,
    }

    impl FakeTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn gated() -> Self {
            Self {
                gate: Some(Arc::new(Notify::new())),
                ..Self::default()
            }
        }

        pub fn reply(self, status: u16, status_text: &str, body: &str) -> Self {
            self.replies.lock().push_back(Ok(HttpResponse {
                status,
                status_text: status_text.to_string(),
                body: body.to_string(),
            }));
            self
        }

        pub fn ok(self, body: &str) -> Self {
            self.reply(200, "OK", body)
        }

        pub fn fail(self, message: &str) -> Self {
            self.replies
                .lock()
                .push_back(Err(RequestError::Transport(message.to_string())));
            self
        }

        pub fn open_gate(&self) {
            if let Some(gate) = &self.gate {
                gate.notify_one();
            }
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().clone()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError> {
            self.requests.lock().push(request);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.replies
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(RequestError::Transport("no scripted reply".to_string())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeTransport;
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn client(transport: FakeTransport) -> (ApiClient, Arc<FakeTransport>) {
        let transport = Arc::new(transport);
        let client = ApiClient::with_transport("http://api.test/", transport.clone());
        (client, transport)
    }

    #[test]
    fn test_resolve_urls() {
        let (client, _) = client(FakeTransport::new());
        assert_eq!(client.base_url(), "http://api.test");
        assert_eq!(client.resolve("/health"), "http://api.test/health");
        assert_eq!(client.resolve("api/echo"), "http://api.test/api/echo");
        assert_eq!(client.resolve("https://other.test/x"), "https://other.test/x");
    }

    #[tokio::test]
    async fn test_success_parses_json() {
        let (client, transport) = client(FakeTransport::new().ok(r#"{"status":"ok"}"#));

        let value = client.get("/health").await.unwrap();

        assert_eq!(value, json!({"status": "ok"}));
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].url, "http://api.test/health");
        assert_eq!(requests[0].body, None);
    }

    #[tokio::test]
    async fn test_post_json_sets_body_and_header() {
        let (client, transport) = client(FakeTransport::new().ok("{}"));

        client
            .post_json("/api/echo", &json!({"message": "ping"}))
            .await
            .unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.body.as_deref(), Some(r#"{"message":"ping"}"#));
        assert_eq!(
            request.headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
    }

    #[tokio::test]
    async fn test_error_status_becomes_http_status_error() {
        let (client, _) = client(FakeTransport::new().reply(500, "Internal Server Error", "boom"));

        let err = client.get("/health").await.unwrap_err();

        assert!(matches!(err, RequestError::HttpStatus { status: 500, .. }));
        assert_eq!(err.to_string(), "500 Internal Server Error: boom");
    }

    #[tokio::test]
    async fn test_error_status_with_empty_body() {
        let (client, _) = client(FakeTransport::new().reply(503, "Service Unavailable", ""));

        let err = client.get("/health").await.unwrap_err();

        assert_eq!(err.to_string(), "503 Service Unavailable");
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let (client, _) = client(FakeTransport::new().ok("<html>oops</html>"));

        let err = client.get("/health").await.unwrap_err();

        assert!(matches!(err, RequestError::Parse(_)));
    }

    #[tokio::test]
    async fn test_transport_failure_passes_message() {
        let (client, transport) = client(FakeTransport::new().fail("connection refused"));

        let err = client.get("/health").await.unwrap_err();

        assert_eq!(err.to_string(), "connection refused");
        // exactly one attempt, no retry
        assert_eq!(transport.requests().len(), 1);
    }
}
