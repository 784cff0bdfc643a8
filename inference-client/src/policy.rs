use std::time::Duration;

/// Retry schedule for one logical call.
///
/// The backoff doubles after every retryable failure starting from
/// `base_backoff`, and each sleep adds a uniform random jitter in
/// `[0, jitter_ceiling)` to avoid synchronized retry storms.
#[derive(Debug, Clone)]
pub struct CallPolicy {
    /// Total transport attempts, the first one included.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles after each retryable failure.
    pub base_backoff: Duration,
    /// Upper bound of the uniform jitter added to every backoff sleep.
    pub jitter_ceiling: Duration,
}

impl Default for CallPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_backoff: Duration::from_secs(1),
            jitter_ceiling: Duration::from_millis(500),
        }
    }
}

impl CallPolicy {
    /// Policy without jitter, used where deterministic delays are needed.
    pub fn without_jitter(mut self) -> Self {
        self.jitter_ceiling = Duration::ZERO;
        self
    }
}
