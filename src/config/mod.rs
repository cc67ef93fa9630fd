use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

/// Port used when neither the config file nor the command line names one
pub const DEFAULT_PORT: u16 = 1090;

/// Log configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LogConfig {
    /// Log level, default is "info"; `RUST_LOG` takes precedence
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// kvhttp configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Server listening address
    #[serde(default = "default_server_addr")]
    pub server_addr: SocketAddr,

    /// Log configuration
    #[serde(default)]
    pub log: LogConfig,
}

fn default_server_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: default_server_addr(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;

        toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }

    /// Replace the port of the listening address, keeping its host
    pub fn with_port(mut self, port: u16) -> Self {
        self.server_addr.set_port(port);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server_addr, "0.0.0.0:1090".parse().unwrap());
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_parse_config() {
        let config_str = r#"
server_addr = "127.0.0.1:8080"

[log]
level = "debug"
"#;

        let config: Config = toml::from_str(config_str).unwrap();
        assert_eq!(config.server_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_with_port() {
        let config = Config::default().with_port(9000);
        assert_eq!(config.server_addr, "0.0.0.0:9000".parse().unwrap());
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("kvhttp-config-{}.toml", std::process::id()));
        fs::write(&path, "server_addr = \"127.0.0.1:7000\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.server_addr, "127.0.0.1:7000".parse().unwrap());
        assert_eq!(config.log, LogConfig::default());

        fs::remove_file(&path).unwrap();
        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn test_bad_address() {
        let result: Result<Config, _> = toml::from_str("server_addr = \"not an address\"");
        assert!(result.is_err());
    }
}
