//! Translation service configuration.

/// Default upstream base URL (the public Overpass instance).
pub const DEFAULT_BASE_URL: &str = "https://overpass-api.de";

/// Path of the interpreter endpoint under the base URL.
pub const INTERPRETER_PATH: &str = "/api/interpreter";

/// Default outbound HTTP timeout ceiling in seconds.
///
/// Sits above the largest server-side timeout a caller is likely to
/// request, so the server-side directive normally fires first.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 300;

/// Configuration for the translation service.
///
/// Supplied once at startup and never mutated afterwards; every call sees
/// the same upstream endpoint and timeout ceiling.
///
/// # Example
///
/// ```
/// use overpass_bridge::service::ServiceConfig;
///
/// let config = ServiceConfig::new()
///     .with_base_url("http://localhost:8091")
///     .with_http_timeout_secs(60);
/// assert_eq!(config.interpreter_url(), "http://localhost:8091/api/interpreter");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Upstream base URL, without the interpreter path.
    base_url: String,
    /// Outbound HTTP timeout ceiling in seconds.
    http_timeout_secs: u64,
}

impl ServiceConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the upstream base URL. A trailing slash is stripped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        self.base_url = base_url;
        self
    }

    /// Set the outbound HTTP timeout ceiling in seconds.
    pub fn with_http_timeout_secs(mut self, secs: u64) -> Self {
        self.http_timeout_secs = secs;
        self
    }

    /// Get the upstream base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the outbound HTTP timeout ceiling in seconds.
    pub fn http_timeout_secs(&self) -> u64 {
        self.http_timeout_secs
    }

    /// The full interpreter endpoint URL.
    pub fn interpreter_url(&self) -> String {
        format!("{}{}", self.base_url, INTERPRETER_PATH)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.http_timeout_secs(), DEFAULT_HTTP_TIMEOUT_SECS);
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(ServiceConfig::new(), ServiceConfig::default());
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let config = ServiceConfig::new().with_base_url("http://localhost:8091/");
        assert_eq!(config.base_url(), "http://localhost:8091");
        assert_eq!(
            config.interpreter_url(),
            "http://localhost:8091/api/interpreter"
        );
    }

    #[test]
    fn test_with_http_timeout_secs() {
        let config = ServiceConfig::new().with_http_timeout_secs(60);
        assert_eq!(config.http_timeout_secs(), 60);
        assert_eq!(config.base_url(), DEFAULT_BASE_URL); // Unchanged
    }
}
