//! Time abstraction for testability.
//!
//! This module provides a [`Sleeper`] trait that allows retry delays to be
//! skipped in tests while production code waits on the tokio timer.

use std::time::Duration;

/// Abstraction over delaying the current task.
///
/// Implementations control how retry delays are awaited, allowing tests
/// to run retry loops without real waiting.
///
/// # Example
///
/// ```
/// use eversign::time::{Sleeper, TokioSleeper};
/// use std::time::Duration;
///
/// # async fn example() {
/// let sleeper = TokioSleeper;
/// sleeper.sleep(Duration::from_millis(1)).await;
/// # }
/// ```
pub trait Sleeper: Send + Sync {
    /// Suspends the current task for the given duration.
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}

/// Production sleeper backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that completes immediately regardless of the requested duration.
///
/// Intended for tests that exercise retry loops without waiting out the
/// configured delays.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}
