//! http-retry: resilient HTTP request execution
//!
//! A library for sending HTTP requests that survive transient network
//! failures and 5xx responses by retrying with linear backoff.

pub mod config;
pub mod executor;
pub mod time;
