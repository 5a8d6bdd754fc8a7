use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::tracker::DEFAULT_PERIOD;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub station: Option<StationConfig>,
    #[serde(default)]
    pub tracker: TrackerConfig,
}

/// Where the catalog and ephemeris endpoints live.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

fn default_session_path() -> PathBuf {
    PathBuf::from("session.json")
}

/// Fixed observer position, used instead of asking the browser.
#[derive(Debug, Clone, Deserialize)]
pub struct StationConfig {
    pub name: Option<String>,
    pub coordinates: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    #[serde(default = "default_update_interval", deserialize_with = "deserialize_duration")]
    pub update_interval: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            update_interval: default_update_interval(),
        }
    }
}

fn default_update_interval() -> Duration {
    DEFAULT_PERIOD
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let duration = humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)?;
    if duration.is_zero() {
        return Err(serde::de::Error::custom("update_interval must be positive"));
    }
    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = Config::from_str("service:\n  base_url: http://localhost:8000\n").unwrap();
        assert_eq!(config.service.base_url, "http://localhost:8000");
        assert_eq!(config.web.bind, "0.0.0.0:8080");
        assert_eq!(config.session.path, PathBuf::from("session.json"));
        assert_eq!(config.tracker.update_interval, Duration::from_secs(1));
        assert!(config.station.is_none());
    }

    #[test]
    fn full_config() {
        let yaml = r#"
service:
  base_url: "http://astro.local:8000/"
web:
  bind: "127.0.0.1:3000"
session:
  path: /var/lib/star-tracker/session.json
station:
  name: Backyard
  coordinates: "47.37, 8.54"
tracker:
  update_interval: 500ms
"#;
        let config = Config::from_str(yaml).unwrap();
        assert_eq!(config.web.bind, "127.0.0.1:3000");
        assert_eq!(config.tracker.update_interval, Duration::from_millis(500));
        let station = config.station.unwrap();
        assert_eq!(station.name.as_deref(), Some("Backyard"));
        assert_eq!(station.coordinates, "47.37, 8.54");
    }

    #[test]
    fn rejects_zero_interval() {
        let yaml = "service:\n  base_url: http://x\ntracker:\n  update_interval: 0s\n";
        assert!(matches!(Config::from_str(yaml), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn service_is_required() {
        assert!(Config::from_str("web:\n  bind: 0.0.0.0:1\n").is_err());
    }
}
