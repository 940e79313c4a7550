// Configuration management for the scanner and the scoring engine

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "SENTINEL_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write config file {path}: {reason}")]
    Write { path: PathBuf, reason: String },
    #[error("`{field}` must be a finite, non-negative number (got {value})")]
    InvalidThreshold { field: &'static str, value: f64 },
    #[error("`flag_score_threshold` must be within 0..=100 (got {0})")]
    ScoreThresholdOutOfRange(u32),
    #[error("`{0}` must not be empty")]
    EmptySet(&'static str),
    #[error("`{0}` contains an empty entry")]
    EmptyEntry(&'static str),
    #[error("`{0}` must be greater than zero")]
    ZeroDuration(&'static str),
    #[error("`interface_name` must not be empty")]
    EmptyInterfaceName,
}

/// What the stealth pass does when the platform reports no window data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StealthPolicy {
    /// Skip stealth detection entirely and mark the report as unchecked.
    #[default]
    DisabledWithoutWindows,
    /// Treat every CPU-active process as windowless.
    FlagActiveProcesses,
}

/// Rule set of the classification engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub distracting_apps: BTreeSet<String>,
    pub distracting_site_keywords: BTreeSet<String>,
    pub browser_apps: BTreeSet<String>,
    pub cpu_threshold_percent: f64,
    pub mem_threshold_mb: f64,
    pub flag_score_threshold: u32,
    pub stealth_activity_threshold_percent: f64,
    pub protected_path_prefixes: Vec<String>,
    pub stealth_policy: StealthPolicy,
}

fn string_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// System directories whose executables are never offered for termination.
pub fn default_protected_prefixes() -> Vec<String> {
    #[cfg(target_os = "windows")]
    {
        vec![r"C:\Windows\".to_string()]
    }
    #[cfg(not(target_os = "windows"))]
    {
        ["/sbin/", "/usr/sbin/", "/usr/lib/systemd/", "/lib/systemd/"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            distracting_apps: string_set(&["chrome", "discord", "tiktok", "spotify"]),
            distracting_site_keywords: string_set(&[
                "tiktok",
                "instagram",
                "twitter",
                "reddit",
                "youtube shorts",
            ]),
            browser_apps: string_set(&["chrome", "firefox", "msedge", "opera", "brave"]),
            cpu_threshold_percent: 15.0,
            mem_threshold_mb: 200.0,
            flag_score_threshold: 60,
            stealth_activity_threshold_percent: 2.0,
            protected_path_prefixes: default_protected_prefixes(),
            stealth_policy: StealthPolicy::default(),
        }
    }
}

fn check_threshold(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { field, value })
    }
}

fn check_set<'a>(
    field: &'static str,
    items: impl IntoIterator<Item = &'a String>,
    required: bool,
) -> Result<(), ConfigError> {
    let mut seen = 0usize;
    for item in items {
        if item.trim().is_empty() {
            return Err(ConfigError::EmptyEntry(field));
        }
        seen += 1;
    }
    if required && seen == 0 {
        return Err(ConfigError::EmptySet(field));
    }
    Ok(())
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_threshold("cpu_threshold_percent", self.cpu_threshold_percent)?;
        check_threshold("mem_threshold_mb", self.mem_threshold_mb)?;
        check_threshold(
            "stealth_activity_threshold_percent",
            self.stealth_activity_threshold_percent,
        )?;
        if self.flag_score_threshold > 100 {
            return Err(ConfigError::ScoreThresholdOutOfRange(self.flag_score_threshold));
        }
        check_set("distracting_apps", &self.distracting_apps, true)?;
        check_set("distracting_site_keywords", &self.distracting_site_keywords, true)?;
        check_set("browser_apps", &self.browser_apps, true)?;
        check_set("protected_path_prefixes", &self.protected_path_prefixes, false)?;
        Ok(())
    }
}

/// Top-level application configuration, stored as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SentinelConfig {
    pub engine: EngineConfig,
    pub interface_name: String,
    pub scan_timeout_secs: u64,
    pub cpu_sample_interval_ms: u64,
    pub auto_scan_interval_secs: Option<u64>,
    pub audit_log_path: PathBuf,
}

impl Default for SentinelConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            interface_name: default_interface_name().to_string(),
            scan_timeout_secs: 10,
            cpu_sample_interval_ms: 250,
            auto_scan_interval_secs: None,
            audit_log_path: data_dir().join("scan_log.txt"),
        }
    }
}

fn default_interface_name() -> &'static str {
    if cfg!(target_os = "windows") {
        "Wi-Fi"
    } else {
        "wlan0"
    }
}

/// Per-user data directory for the audit log and the diagnostic logs.
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("sentinel"))
        .unwrap_or_else(|| PathBuf::from("."))
}

impl SentinelConfig {
    /// Config path: `$SENTINEL_CONFIG`, else `<config dir>/sentinel/config.json`.
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .map(|dir| dir.join("sentinel").join("config.json"))
            .unwrap_or_else(|| PathBuf::from("config.json"))
    }

    /// Loads and validates a config file. A missing file yields the defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SentinelConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let write_err = |reason: String| ConfigError::Write {
            path: path.to_path_buf(),
            reason,
        };
        let content = serde_json::to_string_pretty(self).map_err(|e| write_err(e.to_string()))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
        }
        fs::write(path, content).map_err(|e| write_err(e.to_string()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        if self.interface_name.trim().is_empty() {
            return Err(ConfigError::EmptyInterfaceName);
        }
        if self.scan_timeout_secs == 0 {
            return Err(ConfigError::ZeroDuration("scan_timeout_secs"));
        }
        if self.auto_scan_interval_secs == Some(0) {
            return Err(ConfigError::ZeroDuration("auto_scan_interval_secs"));
        }
        Ok(())
    }
}
