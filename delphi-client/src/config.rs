//! Configuration types for the service client.

use std::time::Duration;

/// How task polling waits.
#[derive(Debug, Clone, Copy)]
pub struct WaitPolicy {
    /// Pause between two polls.
    pub interval: Duration,
    /// Give up after this much total waiting.
    pub timeout: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(50),
            timeout: Duration::from_secs(5),
        }
    }
}

impl WaitPolicy {
    /// Create a policy with a custom poll interval and overall timeout.
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }
}

/// Configuration for the service client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base url of the service, e.g. `http://localhost:7700`.
    pub host: String,
    /// API key presented as a bearer credential. `None` for anonymous
    /// access; most endpoints then answer 401.
    pub api_key: Option<String>,
    /// Per-request timeout applied by the transport. `None` for no timeout.
    pub request_timeout: Option<Duration>,
    /// Default task polling behaviour.
    pub wait: WaitPolicy,
}

impl ClientConfig {
    /// Create a configuration for the service at `host` with defaults
    /// everywhere else.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            api_key: None,
            request_timeout: None,
            wait: WaitPolicy::default(),
        }
    }

    /// Authenticate with this API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Abort requests that take longer than this.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Use this task polling behaviour by default.
    pub fn with_wait_policy(mut self, wait: WaitPolicy) -> Self {
        self.wait = wait;
        self
    }
}
