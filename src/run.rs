//! Application execution logic.
//!
//! Builds one request from the validated configuration, sends it through
//! the retrying executor, and writes the response body to stdout.

use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;

use http_retry::config::{BodySource, ValidatedConfig};
use http_retry::executor::{
    ExecuteError, HttpClient, HttpRequest, HttpResponse, RetryingExecutor,
};
use http_retry::time::Sleeper;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to open the request body file.
    #[error("Failed to open body file '{}': {source}", path.display())]
    BodyFile {
        /// Path to the body file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The request failed on every attempt.
    #[error(transparent)]
    Execute(#[from] ExecuteError),

    /// Failed to write the response body.
    #[error("Failed to write response: {0}")]
    Output(#[source] std::io::Error),
}

/// Executes the configured request and prints the response.
///
/// Excluded from coverage - requires network access.
///
/// # Errors
///
/// Returns an error if the body file cannot be opened, every attempt fails,
/// or stdout cannot be written.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let executor = RetryingExecutor::from_settings(&config.retry);
    let response = send(&executor, &config).await?;

    let stdout = std::io::stdout();
    write_response(&response, &mut stdout.lock())
}

/// Builds the request described by `config` and sends it through `executor`.
async fn send<H: HttpClient, S: Sleeper>(
    executor: &RetryingExecutor<H, S>,
    config: &ValidatedConfig,
) -> Result<HttpResponse, RunError> {
    let request = build_request(config).await?;

    tracing::debug!(method = %request.method, url = %request.url, "Sending request");
    let response = executor.execute(request).await?;
    tracing::info!(status = %response.status, "Response received");

    Ok(response)
}

/// Builds the outgoing request, opening the body file as a stream if needed.
async fn build_request(config: &ValidatedConfig) -> Result<HttpRequest, RunError> {
    let mut request = HttpRequest::new(config.method.clone(), config.url.clone());
    request.headers = config.headers.clone();

    match &config.body {
        Some(BodySource::Inline(bytes)) => Ok(request.with_body(bytes.clone())),
        Some(BodySource::File(path)) => {
            let file = tokio::fs::File::open(path)
                .await
                .map_err(|source| RunError::BodyFile {
                    path: path.clone(),
                    source,
                })?;
            Ok(request.with_stream(file))
        }
        None => Ok(request),
    }
}

/// Writes the response body to `out`.
fn write_response(response: &HttpResponse, out: &mut impl Write) -> Result<(), RunError> {
    out.write_all(&response.body).map_err(RunError::Output)?;
    out.flush().map_err(RunError::Output)
}
