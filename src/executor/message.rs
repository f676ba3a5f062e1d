//! HTTP request/response types and client traits.

use std::fmt;
use std::fmt::Write as _;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncRead;

use super::{DumpError, HttpError};

/// A one-shot readable request body.
pub type BodyStream = Pin<Box<dyn AsyncRead + Send>>;

/// Request body.
///
/// A [`Body::Stream`] is consumed by the first send and cannot be replayed;
/// [`RetryingExecutor`](super::RetryingExecutor) buffers it before the first
/// attempt so every retry carries the same bytes.
pub enum Body {
    /// Fully buffered bytes.
    Bytes(Vec<u8>),
    /// A stream read on send.
    Stream(BodyStream),
}

impl Body {
    /// Returns the buffered bytes, or `None` for a stream.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            Self::Stream(_) => None,
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
            Self::Stream(_) => f.write_str("Stream"),
        }
    }
}

/// An HTTP request to be sent.
///
/// This is a value type that can be constructed and passed to any
/// [`HttpClient`] implementation. It uses standard `http` crate types
/// for method and headers, ensuring compatibility with the broader ecosystem.
#[derive(Debug)]
pub struct HttpRequest {
    /// HTTP method (GET, POST, PUT, DELETE, etc.)
    pub method: http::Method,
    /// Target URL
    pub url: url::Url,
    /// HTTP headers to send
    pub headers: http::HeaderMap,
    /// Optional request body
    pub body: Option<Body>,
}

impl HttpRequest {
    /// Creates a new HTTP request with the given method and URL.
    ///
    /// Headers are initialized to an empty map and body is `None`.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    /// Creates a GET request to the given URL.
    #[must_use]
    pub fn get(url: url::Url) -> Self {
        Self::new(http::Method::GET, url)
    }

    /// Creates a POST request to the given URL.
    #[must_use]
    pub fn post(url: url::Url) -> Self {
        Self::new(http::Method::POST, url)
    }

    /// Sets a buffered request body.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(Body::Bytes(body));
        self
    }

    /// Sets a streaming request body.
    #[must_use]
    pub fn with_stream(mut self, stream: impl AsyncRead + Send + 'static) -> Self {
        self.body = Some(Body::Stream(Box::pin(stream)));
        self
    }

    /// Adds a header to the request.
    ///
    /// If the header name already exists, the value is appended
    /// (HTTP headers can have multiple values).
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Returns the buffered body bytes, if any.
    #[must_use]
    pub fn body_bytes(&self) -> Option<&[u8]> {
        self.body.as_ref().and_then(Body::as_bytes)
    }

    /// Renders the request in HTTP/1.1 wire format.
    ///
    /// The `Host` header is derived from the URL. A buffered body is written
    /// after the blank line (lossy UTF-8); a stream body is never read and
    /// shows as a placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`DumpError::InvalidHeaderValue`] if a header value is not
    /// visible ASCII.
    pub fn dump(&self) -> Result<String, DumpError> {
        let target = &self.url[url::Position::BeforePath..url::Position::AfterQuery];
        let mut out = format!("{} {} HTTP/1.1\r\n", self.method, target);

        if let Some(host) = self.url.host_str() {
            match self.url.port() {
                Some(port) => {
                    let _ = write!(out, "Host: {host}:{port}\r\n");
                }
                None => {
                    let _ = write!(out, "Host: {host}\r\n");
                }
            }
        }

        for (name, value) in &self.headers {
            let value = value.to_str().map_err(|_| DumpError::InvalidHeaderValue {
                name: name.to_string(),
            })?;
            let _ = write!(out, "{name}: {value}\r\n");
        }
        out.push_str("\r\n");

        match &self.body {
            Some(Body::Bytes(bytes)) => out.push_str(&String::from_utf8_lossy(bytes)),
            Some(Body::Stream(_)) => out.push_str("<streaming body>"),
            None => {}
        }

        Ok(out)
    }
}

/// An HTTP response received from a server.
///
/// Contains the status code, headers, and body of the response.
/// The body is fully buffered into memory.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Response body (fully buffered)
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new HTTP response.
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the body as a UTF-8 string, if valid.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

/// Trait for making a single HTTP request.
///
/// # Design
///
/// This trait abstracts the HTTP client implementation, enabling:
/// - Dependency injection for testing with mock clients
/// - Swapping HTTP libraries without changing calling code
/// - Wrapping any client with [`RetryingExecutor`](super::RetryingExecutor)
///
/// # Example
///
/// ```ignore
/// use http_retry::executor::{HttpClient, HttpRequest, HttpResponse, HttpError};
///
/// struct MockClient {
///     response: HttpResponse,
/// }
///
/// impl HttpClient for MockClient {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(self.response.clone())
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Sends an HTTP request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when:
    /// - Network connection fails ([`HttpError::Connection`])
    /// - Request times out ([`HttpError::Timeout`])
    /// - URL is invalid ([`HttpError::InvalidUrl`])
    /// - The body stream cannot be read ([`HttpError::Body`])
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send;
}

impl<C: HttpClient> HttpClient for Arc<C> {
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send {
        (**self).request(req)
    }
}

/// A client that can be freshly built from a timeout alone.
///
/// [`RetryingExecutor::with_timeout`](super::RetryingExecutor::with_timeout)
/// relies on this to replace its transport whenever the timeout changes.
pub trait TimeoutTransport: HttpClient + Sized {
    /// Builds a new client that enforces `timeout` on every request.
    fn from_timeout(timeout: Duration) -> Self;

    /// Returns the per-request timeout, if one is configured.
    fn timeout(&self) -> Option<Duration>;
}
