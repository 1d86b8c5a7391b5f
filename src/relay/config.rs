//! Relay configuration

use std::time::Duration;

/// Configuration for the lobby registry
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// How long a lobby with no producer and no clients survives before the
    /// cleanup task evicts it
    pub idle_lobby_timeout: Duration,

    /// How often the background cleanup task runs
    pub cleanup_interval: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            idle_lobby_timeout: Duration::from_secs(300),
            cleanup_interval: Duration::from_secs(30),
        }
    }
}

impl RelayConfig {
    /// Set the idle lobby timeout
    pub fn idle_lobby_timeout(mut self, timeout: Duration) -> Self {
        self.idle_lobby_timeout = timeout;
        self
    }

    /// Set the cleanup interval
    pub fn cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RelayConfig::default();

        assert_eq!(config.idle_lobby_timeout, Duration::from_secs(300));
        assert_eq!(config.cleanup_interval, Duration::from_secs(30));
    }

    #[test]
    fn test_builder_chaining() {
        let config = RelayConfig::default()
            .idle_lobby_timeout(Duration::from_secs(60))
            .cleanup_interval(Duration::from_secs(5));

        assert_eq!(config.idle_lobby_timeout, Duration::from_secs(60));
        assert_eq!(config.cleanup_interval, Duration::from_secs(5));
    }
}
