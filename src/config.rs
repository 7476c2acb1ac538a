use std::time::Duration;

/// Harness configuration shared by stores and fake services.
///
/// Controls the simulated service latency and how long the harness waits for
/// thunks to settle. Use the builder pattern to customize, or use
/// [`Default`] for sensible defaults.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use mockstore::Config;
///
/// let config = Config::default()
///     .with_service_delay(Duration::from_millis(1))   // Faster fake calls
///     .with_settle_timeout(Duration::from_secs(5));   // Slow CI machines
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Fixed delay before a fake service call resolves or rejects.
    /// There's no jitter or backoff, so tests stay deterministic.
    /// Default: 10 ms
    pub service_delay: Duration,

    /// Upper bound for [`Harness::run`](crate::Harness::run),
    /// [`MockStore::settle`](crate::MockStore::settle) and
    /// [`MockStore::settle_on`](crate::MockStore::settle_on).
    /// Default: 1 s
    pub settle_timeout: Duration,

    /// Initial capacity of the recorded sequence.
    /// Default: 1024
    pub initial_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            service_delay: Duration::from_millis(10),
            settle_timeout: Duration::from_secs(1),
            initial_capacity: 1024,
        }
    }
}

impl Config {
    /// Set the delay used by fake services created from this config.
    pub fn with_service_delay(mut self, delay: Duration) -> Self {
        self.service_delay = delay;
        self
    }

    /// Set how long the harness waits for dispatch chains to settle.
    ///
    /// The timeout only bounds waiting; it never cancels a running thunk.
    pub fn with_settle_timeout(mut self, timeout: Duration) -> Self {
        self.settle_timeout = timeout;
        self
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}
