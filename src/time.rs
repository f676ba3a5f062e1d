//! Delay abstraction for testability.
//!
//! This module provides a [`Sleeper`] trait that allows injecting instant or
//! recording sleepers in tests while using the real tokio timer in production.

use std::future::Future;
use std::time::Duration;

/// Abstraction over waiting for a duration.
///
/// The retry loop suspends between attempts through this trait, so tests can
/// observe the backoff schedule without any wall-clock waiting.
///
/// # Example
///
/// ```
/// use http_retry::time::{InstantSleeper, Sleeper};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// InstantSleeper.sleep(Duration::from_secs(60)).await; // returns immediately
/// # }
/// ```
pub trait Sleeper: Send + Sync {
    /// Suspends the current task for `duration`.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Production sleeper backed by [`tokio::time::sleep`].
///
/// This is the sleeper selected when none is supplied explicitly.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}

impl<S: Sleeper> Sleeper for std::sync::Arc<S> {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        (**self).sleep(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// A sleeper that records requested durations instead of waiting.
    #[derive(Default)]
    struct RecordingSleeper {
        calls: Mutex<Vec<Duration>>,
    }

    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.calls.lock().unwrap().push(duration);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_sleeper_waits_for_duration() {
        let start = tokio::time::Instant::now();

        TokioSleeper.sleep(Duration::from_secs(4)).await;

        assert!(start.elapsed() >= Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_sleeper_zero_duration_completes() {
        let start = tokio::time::Instant::now();

        TokioSleeper.sleep(Duration::ZERO).await;

        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn instant_sleeper_does_not_advance_time() {
        let start = tokio::time::Instant::now();

        InstantSleeper.sleep(Duration::from_secs(3600)).await;

        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn arc_sleeper_delegates_to_inner() {
        let inner = Arc::new(RecordingSleeper::default());
        let shared = Arc::clone(&inner);

        shared.sleep(Duration::from_secs(2)).await;
        shared.sleep(Duration::from_secs(4)).await;

        assert_eq!(
            *inner.calls.lock().unwrap(),
            vec![Duration::from_secs(2), Duration::from_secs(4)]
        );
    }

    #[test]
    fn sleepers_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TokioSleeper>();
        assert_send_sync::<InstantSleeper>();
    }

    fn assert_default<T: Default>() {}

    #[test]
    fn sleepers_are_default() {
        assert_default::<TokioSleeper>();
        assert_default::<InstantSleeper>();
    }
}
