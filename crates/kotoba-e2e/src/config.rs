//! Environment-driven configuration for live scenario runs.

use tracing_subscriber::EnvFilter;

/// Base URL used when `E2E_BASE_URL` is not set (the application's Vite dev
/// server)
pub const DEFAULT_BASE_URL: &str = "http://localhost:5173";

/// Configuration for a live scenario session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestConfig {
    /// Base URL of the application under test
    pub base_url: String,
    /// Run the browser headless
    pub headless: bool,
    /// Explicit chromium binary path, if auto-detection is not wanted
    pub chromium_path: Option<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headless: true,
            chromium_path: None,
        }
    }
}

impl TestConfig {
    /// Read configuration from the environment.
    ///
    /// - `E2E_BASE_URL`: application base URL (default `http://localhost:5173`)
    /// - `E2E_HEADFUL`: any non-empty value other than `0`/`false` shows the
    ///   browser window
    /// - `CHROMIUM_PATH`: chromium binary override
    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("E2E_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let headful = std::env::var("E2E_HEADFUL")
            .map(|v| !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false"))
            .unwrap_or(false);
        let chromium_path = std::env::var("CHROMIUM_PATH").ok();
        Self {
            base_url,
            headless: !headful,
            chromium_path,
        }
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Install the tracing subscriber for scenario runs.
///
/// Honors `RUST_LOG`; defaults to warn-level output with debug-level detail
/// for this crate. Safe to call from every scenario: later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,kotoba_e2e=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_headless_local() {
        let config = TestConfig::default();
        assert_eq!(config.base_url, "http://localhost:5173");
        assert!(config.headless);
        assert!(config.chromium_path.is_none());
    }

    #[test]
    fn base_url_override() {
        let config = TestConfig::default().with_base_url("http://staging.example");
        assert_eq!(config.base_url, "http://staging.example");
    }

    #[test]
    fn init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
