//! Process configuration read from the environment.

use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid LISTEN_ADDR {0:?}: {1}")]
    InvalidAddress(String, std::net::AddrParseError),
}

/// Delays the game loop observes between steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameTiming {
    /// Sleep after a step that consumed no message
    pub tick: Duration,
    /// Quiet period after every phase change
    pub settle: Duration,
    /// Stands in for a night step whose role has nobody able to act
    pub dramatic_pause: Duration,
    pub victory_pause: Duration,
}

impl Default for GameTiming {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(100),
            settle: Duration::from_millis(500),
            dramatic_pause: Duration::from_millis(10_000),
            victory_pause: Duration::from_millis(1_000),
        }
    }
}

impl GameTiming {
    /// No delays at all
    pub fn instant() -> Self {
        Self {
            tick: Duration::ZERO,
            settle: Duration::ZERO,
            dramatic_pause: Duration::ZERO,
            victory_pause: Duration::ZERO,
        }
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            tick: env_millis("TICK_MS").unwrap_or(defaults.tick),
            settle: env_millis("SETTLE_MS").unwrap_or(defaults.settle),
            dramatic_pause: env_millis("DRAMATIC_PAUSE_MS").unwrap_or(defaults.dramatic_pause),
            victory_pause: env_millis("VICTORY_PAUSE_MS").unwrap_or(defaults.victory_pause),
        }
    }
}

fn env_millis(key: &str) -> Option<Duration> {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .map(Duration::from_millis)
}

/// Where the HTTP listener binds and which extra listeners run
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub listen_addr: SocketAddr,
    /// Also read `sender: text` lines from stdin
    pub stdin_listener: bool,
    pub timing: GameTiming,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 6669)),
            stdin_listener: false,
            timing: GameTiming::default(),
        }
    }
}

impl HostConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let listen_addr = match std::env::var("LISTEN_ADDR") {
            Ok(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::InvalidAddress(raw.clone(), e))?,
            _ => defaults.listen_addr,
        };

        let stdin_listener = std::env::var("STDIN_LISTENER")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let config = Self {
            listen_addr,
            stdin_listener,
            timing: GameTiming::from_env(),
        };

        tracing::info!(
            listen_addr = %config.listen_addr,
            stdin_listener = config.stdin_listener,
            timing = ?config.timing,
            "Host config loaded"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "LISTEN_ADDR",
            "STDIN_LISTENER",
            "TICK_MS",
            "SETTLE_MS",
            "DRAMATIC_PAUSE_MS",
            "VICTORY_PAUSE_MS",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        clear_env();
        let config = HostConfig::from_env().unwrap();
        assert_eq!(config.listen_addr, SocketAddr::from(([0, 0, 0, 0], 6669)));
        assert!(!config.stdin_listener);
        assert_eq!(config.timing, GameTiming::default());
        assert_eq!(config.timing.dramatic_pause, Duration::from_secs(10));
    }

    #[test]
    #[serial]
    fn test_overrides_from_env() {
        clear_env();
        std::env::set_var("LISTEN_ADDR", "127.0.0.1:8080");
        std::env::set_var("STDIN_LISTENER", "TRUE");
        std::env::set_var("SETTLE_MS", "0");
        std::env::set_var("DRAMATIC_PAUSE_MS", "soon");

        let config = HostConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.listen_addr, SocketAddr::from(([127, 0, 0, 1], 8080)));
        assert!(config.stdin_listener);
        assert_eq!(config.timing.settle, Duration::ZERO);
        assert_eq!(config.timing.dramatic_pause, Duration::from_secs(10));
        assert_eq!(config.timing.tick, Duration::from_millis(100));
    }

    #[test]
    #[serial]
    fn test_bad_listen_addr() {
        clear_env();
        std::env::set_var("LISTEN_ADDR", "localhost");
        let result = HostConfig::from_env();
        clear_env();
        assert!(matches!(result, Err(ConfigError::InvalidAddress(..))));
    }

    #[test]
    fn test_instant_timing() {
        let timing = GameTiming::instant();
        assert_eq!(timing.tick, Duration::ZERO);
        assert_eq!(timing.victory_pause, Duration::ZERO);
    }
}
