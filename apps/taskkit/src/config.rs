//! taskkit configuration.
//!
//! Configuration is stored as TOML at `$TASKKIT_CONFIG` if set, otherwise:
//! - Linux: `~/.config/taskkit/taskkit.toml`
//! - Windows: `%APPDATA%/taskkit/taskkit.toml`
//! - macOS: `~/Library/Application Support/taskkit/taskkit.toml`
//!
//! A missing file means defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use taskkit_tasks::tasks::DEFAULT_TAIL_LINES;

/// Environment variable overriding the config file location.
const CONFIG_ENV: &str = "TASKKIT_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Lines kept by `tail` when `--lines` is not given.
    #[serde(default = "default_tail_lines")]
    pub tail_lines: usize,

    /// Log filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_tail_lines() -> usize {
    DEFAULT_TAIL_LINES
}

fn default_log_level() -> String {
    "warn".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tail_lines: default_tail_lines(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Loads configuration from the platform path (or `$TASKKIT_CONFIG`).
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path())
    }

    /// Loads configuration from `path`, falling back to defaults if the file
    /// does not exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;

        anyhow::ensure!(
            config.tail_lines > 0,
            "tail_lines must be > 0 in {}",
            path.display()
        );
        Ok(config)
    }
}

/// Returns the configuration file path.
fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }

    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        PathBuf::from(appdata).join("taskkit").join("taskkit.toml")
    }

    #[cfg(target_os = "macos")]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home)
            .join("Library")
            .join("Application Support")
            .join("taskkit")
            .join("taskkit.toml")
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home)
            .join(".config")
            .join("taskkit")
            .join("taskkit.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.tail_lines, 10);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = Config {
            tail_lines: 50,
            log_level: "debug".into(),
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.tail_lines, 50);
        assert_eq!(parsed.log_level, "debug");
    }

    #[test]
    fn config_partial_toml() {
        // Only tail_lines, the rest falls back to defaults.
        let config: Config = toml::from_str("tail_lines = 3").unwrap();
        assert_eq!(config.tail_lines, 3);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::load_from(&tmp.path().join("taskkit.toml")).unwrap();
        assert_eq!(config.tail_lines, DEFAULT_TAIL_LINES);
        assert!(!tmp.path().join("taskkit.toml").exists());
    }

    #[test]
    fn load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("taskkit.toml");
        std::fs::write(&path, "tail_lines = 25\nlog_level = \"info\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.tail_lines, 25);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn load_rejects_zero_tail_lines() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("taskkit.toml");
        std::fs::write(&path, "tail_lines = 0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("tail_lines"));
    }

    #[test]
    fn load_rejects_invalid_toml() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("taskkit.toml");
        std::fs::write(&path, "tail_lines = \"many\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().starts_with("parsing "));
    }

    #[test]
    fn config_path_not_empty() {
        assert!(config_path().to_string_lossy().contains("taskkit"));
    }
}
