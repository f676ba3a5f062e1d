//! Production HTTP client implementation using reqwest.

use std::time::Duration;

use tokio::io::AsyncReadExt;

use super::{Body, HttpClient, HttpError, HttpRequest, HttpResponse, TimeoutTransport};

/// Production HTTP client using reqwest.
///
/// This is a thin wrapper around `reqwest::Client` that implements
/// the [`HttpClient`] trait. An optional timeout is applied to each
/// request individually.
///
/// # Example
///
/// ```no_run
/// use http_retry::executor::{ReqwestClient, HttpClient, HttpRequest};
/// use std::time::Duration;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::with_timeout(Duration::from_secs(10));
/// let url = Url::parse("https://api.example.com/items")?;
/// let request = HttpRequest::post(url).with_body(b"hello".to_vec());
/// let response = client.request(request).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
    timeout: Option<Duration>,
}

impl ReqwestClient {
    /// Creates a new HTTP client with default configuration and no timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
            timeout: None,
        }
    }

    /// Creates a new HTTP client that times out each request after `timeout`.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            inner: reqwest::Client::new(),
            timeout: Some(timeout),
        }
    }

    /// Creates an HTTP client from an existing reqwest client.
    ///
    /// Useful when you need custom configuration (proxies, TLS, etc.).
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self {
            inner: client,
            timeout: None,
        }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeoutTransport for ReqwestClient {
    fn from_timeout(timeout: Duration) -> Self {
        Self::with_timeout(timeout)
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = self.inner.request(req.method, req.url.as_str());

        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        match req.body {
            Some(Body::Bytes(bytes)) => builder = builder.body(bytes),
            Some(Body::Stream(mut stream)) => {
                let mut bytes = Vec::new();
                stream
                    .read_to_end(&mut bytes)
                    .await
                    .map_err(HttpError::Body)?;
                builder = builder.body(bytes);
            }
            None => {}
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout
            } else if e.is_builder() {
                HttpError::InvalidUrl(e.to_string())
            } else {
                HttpError::Connection(Box::new(e))
            }
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    HttpError::Timeout
                } else {
                    HttpError::Connection(Box::new(e))
                }
            })?
            .to_vec();

        Ok(HttpResponse::new(status, headers, body))
    }
}
