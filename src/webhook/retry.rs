//! Retry policy configuration for the post-completion download.

use std::time::Duration;

/// Configuration for the fixed-delay download retry loop.
///
/// The download that follows a completed-document event retries on any
/// failure, waiting a fixed delay between attempts. The number of
/// attempts is bounded by default; retrying until success is available
/// but must be requested explicitly via [`RetryPolicy::unbounded`].
///
/// # Defaults
///
/// - `max_attempts`: 5
/// - `delay`: 2 seconds
///
/// # Example
///
/// ```
/// use eversign::webhook::RetryPolicy;
/// use std::time::Duration;
///
/// // Create with defaults
/// let policy = RetryPolicy::new();
///
/// // Or customize via builder
/// let custom = RetryPolicy::new()
///     .with_max_attempts(10)
///     .with_delay(Duration::from_secs(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the initial attempt.
    ///
    /// `None` retries until success. A value of 1 means no retries;
    /// only the initial attempt is made.
    pub max_attempts: Option<u32>,

    /// Fixed delay between attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    /// Default maximum attempts.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

    /// Default delay between attempts (2 seconds).
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

    /// Minimum value for `max_attempts`.
    pub const MIN_MAX_ATTEMPTS: u32 = 1;

    /// Creates a bounded retry policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_attempts: Some(Self::DEFAULT_MAX_ATTEMPTS),
            delay: Self::DEFAULT_DELAY,
        }
    }

    /// Creates a policy that retries until the download succeeds.
    ///
    /// The dispatcher blocks for the whole loop, so an unreachable
    /// document store stalls the calling worker until the enclosing
    /// task is terminated.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            max_attempts: None,
            delay: Self::DEFAULT_DELAY,
        }
    }

    /// Sets the maximum number of attempts.
    ///
    /// # Panics
    ///
    /// Panics if `max_attempts` is less than 1.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        assert!(
            max_attempts >= Self::MIN_MAX_ATTEMPTS,
            "max_attempts must be at least 1"
        );
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Sets the delay between attempts.
    ///
    /// Zero delay is supported (useful for testing) but not recommended
    /// for production as it creates a tight retry loop.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns true if another attempt may follow the given one.
    ///
    /// # Arguments
    ///
    /// * `attempt` - The attempt number (1 = first attempt, 2 = first
    ///   retry, etc.)
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        match self.max_attempts {
            None => true,
            Some(max) => attempt < max,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}
