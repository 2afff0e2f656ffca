//! Client configuration.

use std::time::Duration;

/// Base URL of the Kongregate server API.
pub const KONGREGATE_API_URL: &str = "https://api.kongregate.com/";

/// Where requests go and how long they may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Upper bound for the whole request, including reading the body.
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: KONGREGATE_API_URL.to_string(),
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(60),
        }
    }
}

impl ClientConfig {
    /// Default timeouts against another host, e.g. a local test server.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_kongregate_with_sixty_second_timeouts() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.kongregate.com/");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(60));
    }

    #[test]
    fn with_base_url_keeps_default_timeouts() {
        let config = ClientConfig::with_base_url("http://127.0.0.1:3000");
        assert_eq!(config.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.timeout, ClientConfig::default().timeout);
    }
}
