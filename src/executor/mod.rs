//! HTTP execution layer with retries.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`], [`Body`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`], [`TimeoutTransport`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Retrying transient failures with linear backoff ([`RetryingExecutor`])

mod client;
mod error;
mod message;
mod retry;

#[cfg(test)]
mod message_tests;

pub use client::ReqwestClient;
pub use error::{DumpError, ExecuteError, HttpError};
pub use message::{Body, BodyStream, HttpClient, HttpRequest, HttpResponse, TimeoutTransport};
pub use retry::RetryingExecutor;
