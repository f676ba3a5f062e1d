//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default HTTP method for requests.
pub const METHOD: &str = "GET";

/// Default total number of attempts per request.
pub const MAX_RETRIES: u32 = 3;

/// Default backoff multiplier in seconds.
pub const BACKOFF_UNIT_SECS: u32 = 2;

/// Default per-attempt timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Default per-attempt timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}
