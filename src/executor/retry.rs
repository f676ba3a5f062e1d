//! Retrying HTTP executor with linear backoff.

use std::time::Duration;

use tokio::io::AsyncReadExt;
use tracing::{info, trace, warn};

use crate::config::{RetrySettings, defaults};
use crate::time::{Sleeper, TokioSleeper};

use super::{
    Body, BodyStream, ExecuteError, HttpClient, HttpRequest, HttpResponse, ReqwestClient,
    TimeoutTransport,
};

/// Wraps an [`HttpClient`] and retries transient failures.
///
/// A failure is a transport error or a response with status 500 or above.
/// Every other response, including 4xx, is returned to the caller as-is.
/// After the attempt with index `n` fails, the executor waits
/// `n * backoff_unit` seconds, so the first retry follows immediately.
///
/// # Defaults
///
/// - `max_retries`: 3 (total attempts, not additional ones)
/// - `backoff_unit`: 2 seconds
/// - `timeout`: 30 seconds, enforced by the default [`ReqwestClient`]
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation (defaults to [`ReqwestClient`])
/// - `S`: The sleeper used between attempts (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```no_run
/// use http_retry::executor::{HttpRequest, RetryingExecutor};
/// use std::time::Duration;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let executor = RetryingExecutor::new()
///     .with_max_retries(5)
///     .with_timeout(Duration::from_secs(10));
///
/// let request = HttpRequest::post(Url::parse("https://api.example.com/items")?)
///     .with_body(br#"{"name":"widget"}"#.to_vec());
/// let response = executor.execute(request).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RetryingExecutor<H = ReqwestClient, S = TokioSleeper> {
    client: H,
    sleeper: S,
    max_retries: u32,
    backoff_unit: u32,
    timeout: Duration,
}

impl RetryingExecutor<ReqwestClient, TokioSleeper> {
    /// Creates an executor with default settings.
    ///
    /// Uses a [`ReqwestClient`] configured with the default timeout and
    /// [`TokioSleeper`] for delays.
    #[must_use]
    pub fn new() -> Self {
        let timeout = defaults::timeout();
        Self {
            client: ReqwestClient::with_timeout(timeout),
            sleeper: TokioSleeper,
            max_retries: defaults::MAX_RETRIES,
            backoff_unit: defaults::BACKOFF_UNIT_SECS,
            timeout,
        }
    }

    /// Creates an executor from validated settings.
    #[must_use]
    pub fn from_settings(settings: &RetrySettings) -> Self {
        Self::new()
            .with_max_retries(settings.max_retries)
            .with_backoff_unit(settings.backoff_unit)
            .with_timeout(settings.timeout)
    }
}

impl Default for RetryingExecutor<ReqwestClient, TokioSleeper> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, S> RetryingExecutor<H, S> {
    /// Sets the total number of attempts.
    ///
    /// # Panics
    ///
    /// Panics if `max_retries` is 0.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        assert!(max_retries >= 1, "max_retries must be at least 1");
        self.max_retries = max_retries;
        self
    }

    /// Sets the backoff multiplier in seconds.
    ///
    /// # Panics
    ///
    /// Panics if `backoff_unit` is 0.
    #[must_use]
    pub fn with_backoff_unit(mut self, backoff_unit: u32) -> Self {
        assert!(backoff_unit >= 1, "backoff_unit must be at least 1");
        self.backoff_unit = backoff_unit;
        self
    }

    /// Replaces the HTTP client.
    ///
    /// The recorded timeout is left as is; the new client is expected to
    /// enforce its own.
    #[must_use]
    pub fn with_client<H2>(self, client: H2) -> RetryingExecutor<H2, S> {
        RetryingExecutor {
            client,
            sleeper: self.sleeper,
            max_retries: self.max_retries,
            backoff_unit: self.backoff_unit,
            timeout: self.timeout,
        }
    }

    /// Sets a custom sleeper for retry delays.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> RetryingExecutor<H, S2> {
        RetryingExecutor {
            client: self.client,
            sleeper,
            max_retries: self.max_retries,
            backoff_unit: self.backoff_unit,
            timeout: self.timeout,
        }
    }

    /// Returns the total number of attempts.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the backoff multiplier in seconds.
    #[must_use]
    pub const fn backoff_unit(&self) -> u32 {
        self.backoff_unit
    }

    /// Returns the configured timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the HTTP client.
    #[must_use]
    pub const fn client(&self) -> &H {
        &self.client
    }

    /// Returns the delay that follows the failed attempt with index `attempt`.
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        Duration::from_secs(u64::from(attempt) * u64::from(self.backoff_unit))
    }
}

impl<H: TimeoutTransport, S> RetryingExecutor<H, S> {
    /// Sets the timeout and rebuilds the HTTP client around it.
    ///
    /// The current client is discarded, including one installed with
    /// [`with_client`](Self::with_client). Retry count and backoff unit are
    /// kept.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self.client = H::from_timeout(timeout);
        self
    }
}

impl<H: HttpClient, S: Sleeper> RetryingExecutor<H, S> {
    /// Sends `request`, retrying transport errors and 5xx responses.
    ///
    /// A streaming body is read into memory before the first attempt so each
    /// attempt sends identical bytes. If that read fails, the first attempt
    /// sends whatever is left of the stream and later attempts send no body.
    ///
    /// # Errors
    ///
    /// Returns [`ExecuteError::RetriesExhausted`] when every attempt failed.
    /// The individual failures are logged, not returned.
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ExecuteError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let (buffered, mut leftover) = match body {
            Some(body) => buffer_body(body, &url).await,
            None => (None, None),
        };

        for attempt in 0..self.max_retries {
            trace!(attempt, url = %url, "Sending HTTP request");

            let body = leftover
                .take()
                .map(Body::Stream)
                .or_else(|| buffered.clone().map(Body::Bytes));
            let attempt_request = HttpRequest {
                method: method.clone(),
                url: url.clone(),
                headers: headers.clone(),
                body,
            };

            match self.client.request(attempt_request).await {
                Ok(response) if response.status.as_u16() < 500 => return Ok(response),
                Ok(response) => {
                    warn!(attempt, status = %response.status, url = %url, "HTTP request failed");
                }
                Err(error) => {
                    warn!(attempt, error = %error, url = %url, "HTTP request failed");
                }
            }

            self.sleeper.sleep(self.delay_after(attempt)).await;
        }

        let request = HttpRequest {
            method,
            url,
            headers,
            body: buffered.map(Body::Bytes),
        };
        self.report_exhausted(&request);

        Err(ExecuteError::RetriesExhausted {
            attempts: self.max_retries,
        })
    }

    fn report_exhausted(&self, request: &HttpRequest) {
        match request.dump() {
            Ok(dump) => info!(
                attempts = self.max_retries,
                request = %dump,
                "Max retry limit reached for request"
            ),
            Err(error) => info!(
                attempts = self.max_retries,
                request = ?request,
                dump_error = %error,
                "Max retry limit reached for request; failed to render it"
            ),
        }
    }
}

/// Reads a request body into memory.
///
/// Returns the buffered bytes, or the partially read stream when reading fails.
async fn buffer_body(body: Body, url: &url::Url) -> (Option<Vec<u8>>, Option<BodyStream>) {
    match body {
        Body::Bytes(bytes) => (Some(bytes), None),
        Body::Stream(mut stream) => {
            let mut bytes = Vec::new();
            match stream.read_to_end(&mut bytes).await {
                Ok(_) => (Some(bytes), None),
                Err(error) => {
                    warn!(url = %url, error = %error, "Unable to read body from request");
                    (None, Some(stream))
                }
            }
        }
    }
}
