use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Daemon base URL (e.g., http://127.0.0.1:8080)
    pub server_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Interval between /status polls while a sync is in flight
    #[serde(default = "default_status_poll")]
    pub status_poll_secs: u64,
}

fn default_request_timeout() -> u64 {
    10
}
fn default_status_poll() -> u64 {
    2
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            server_url: String::new(),
            request_timeout_secs: default_request_timeout(),
            status_poll_secs: default_status_poll(),
        }
    }
}

impl ConsoleConfig {
    /// Default config file path for this platform
    pub fn default_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "filesync", "console") {
            dirs.config_dir().join("config.json")
        } else {
            PathBuf::from("filesync-console.json")
        }
    }

    /// Log file path, kept next to the config so the terminal stays clean
    /// while the UI owns it.
    pub fn default_log_path() -> PathBuf {
        Self::default_path().with_file_name("filesync-console.log")
    }

    /// Load config from a file path
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        let config: Self =
            serde_json::from_str(&data).with_context(|| "failed to parse config JSON")?;
        Ok(config)
    }

    /// Save config to a file path
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create config dir {}", parent.display()))?;
        }
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::default();
        assert!(config.server_url.is_empty());
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.status_poll_secs, 2);
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let config: ConsoleConfig =
            serde_json::from_str(r#"{"server_url":"http://localhost:8080"}"#).unwrap();
        assert_eq!(config.server_url, "http://localhost:8080");
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.status_poll_secs, 2);
    }

    #[test]
    fn test_roundtrip() {
        let config = ConsoleConfig {
            server_url: "http://10.0.0.2:8080".to_string(),
            request_timeout_secs: 5,
            status_poll_secs: 1,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: ConsoleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.server_url, config.server_url);
        assert_eq!(back.request_timeout_secs, 5);
        assert_eq!(back.status_poll_secs, 1);
    }
}
