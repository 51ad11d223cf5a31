//! Wait mechanisms for polling assertions and route transitions.
//!
//! Every assertion in this suite is polling-based: the condition is
//! re-evaluated against the live page until it holds or a bounded wait
//! elapses. A lapsed wait is a hard failure for that scenario, reported as
//! [`E2eError::Timeout`] with the condition and the last observed value.
//!
//! Uses `tokio::time` throughout so paused-clock tests run deterministically.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::result::{E2eError, E2eResult};

/// Default wait budget for assertions (5 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Options for polling waits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Wait budget in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wait budget in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Wait budget as a [`Duration`]
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Polling interval as a [`Duration`]
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// One probe of a polled condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    /// Condition holds; the wait finishes with this value
    Ready(T),
    /// Condition does not hold yet; carries the last observed value for the
    /// timeout report
    Pending(String),
}

/// Re-evaluate `probe` until it reports [`PollOutcome::Ready`] or `timeout`
/// elapses.
///
/// `waiting_for` names the condition for the timeout report; the last
/// [`PollOutcome::Pending`] observation is appended to it. Probe errors
/// propagate immediately and are never retried.
pub async fn poll_until<T, F, Fut>(
    timeout: Duration,
    poll_interval: Duration,
    waiting_for: &str,
    mut probe: F,
) -> E2eResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = E2eResult<PollOutcome<T>>>,
{
    let deadline = Instant::now() + timeout;
    let mut last_seen = String::new();
    loop {
        match probe().await? {
            PollOutcome::Ready(value) => return Ok(value),
            PollOutcome::Pending(seen) => last_seen = seen,
        }
        if Instant::now() >= deadline {
            let waiting_for = if last_seen.is_empty() {
                waiting_for.to_string()
            } else {
                format!("{waiting_for} (last saw {last_seen})")
            };
            return Err(E2eError::Timeout {
                ms: timeout.as_millis() as u64,
                waiting_for,
            });
        }
        tokio::time::sleep(poll_interval).await;
    }
}

/// Path component of a URL, without scheme, host, query, or fragment.
///
/// Route assertions compare paths so a scenario written against
/// `http://localhost:5173` also holds against a staging host.
#[must_use]
pub fn url_path(url: &str) -> &str {
    let without_scheme = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None => url,
    };
    let path = match without_scheme.find('/') {
        Some(idx) => &without_scheme[idx..],
        None => "/",
    };
    let end = path
        .find(['?', '#'])
        .unwrap_or(path.len());
    &path[..end]
}
