//! Result and error types for the e2e suite.

use thiserror::Error;

/// Result type for e2e operations
pub type E2eResult<T> = Result<T, E2eError>;

/// Errors that can occur while driving the application under test
#[derive(Debug, Error)]
pub enum E2eError {
    /// No browser executable could be located on this machine
    #[error("Browser not found. Install Chromium or set CHROMIUM_PATH")]
    BrowserNotFound,

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Page error
    #[error("Page error: {message}")]
    Page {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// JavaScript evaluation error
    #[error("Evaluation failed: {message}")]
    Eval {
        /// Error message
        message: String,
    },

    /// A polled expectation did not hold within its wait budget.
    ///
    /// Carries the condition that was being waited for (including the locator
    /// description and the last observed value) so a failing scenario reports
    /// what it was looking at.
    #[error("Timed out after {ms}ms waiting for {waiting_for}")]
    Timeout {
        /// Wait budget in milliseconds
        ms: u64,
        /// Description of the unmet condition
        waiting_for: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl E2eError {
    /// Whether this error is a wait-budget expiry.
    ///
    /// The advisory probe in `ProfilePage::save_changes` tolerates exactly
    /// this variant and nothing else.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_display_names_condition() {
        let err = E2eError::Timeout {
            ms: 5000,
            waiting_for: "text(\"Слова\") to be visible".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("5000ms"));
        assert!(msg.contains("Слова"));
    }

    #[test]
    fn is_timeout_distinguishes_variants() {
        let timeout = E2eError::Timeout {
            ms: 1000,
            waiting_for: "x".to_string(),
        };
        let eval = E2eError::Eval {
            message: "boom".to_string(),
        };
        assert!(timeout.is_timeout());
        assert!(!eval.is_timeout());
    }

    #[test]
    fn browser_not_found_names_the_remedy() {
        assert!(E2eError::BrowserNotFound.to_string().contains("CHROMIUM_PATH"));
    }

    #[test]
    fn navigation_display_includes_url() {
        let err = E2eError::Navigation {
            url: "http://localhost:5173/home".to_string(),
            message: "net::ERR_CONNECTION_REFUSED".to_string(),
        };
        assert!(err.to_string().contains("http://localhost:5173/home"));
    }
}
