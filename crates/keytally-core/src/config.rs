//! Configuration types for keytally.
//!
//! [`Config::load`] reads `~/.config/keytally/config.toml`, creating it with
//! the built-in defaults if it does not yet exist, then applies
//! `KEYTALLY__SECTION__KEY` environment overrides. [`Config::defaults`]
//! returns the defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[tracking]
data_file           = "key_counts.json"
flush_interval_secs = 5
exit_on_escape      = true
enhanced_keyboard   = true

[stats]
mode  = "list"
top_n = 0
color = true

[logging]
level = "warn"
"#;

const ENV_PREFIX: &str = "KEYTALLY";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tracking: TrackingConfig,
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[tracking]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackingConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    #[serde(default = "default_flush_interval_secs")]
    pub flush_interval_secs: u64,
    /// Stop tracking when Esc is pressed. Esc is then not counted.
    #[serde(default = "default_true")]
    pub exit_on_escape: bool,
    /// Ask the terminal to report modifier and other non-text keys when it
    /// supports the kitty keyboard protocol.
    #[serde(default = "default_true")]
    pub enhanced_keyboard: bool,
}

impl TrackingConfig {
    pub fn flush_interval(&self) -> Duration {
        Duration::from_secs(self.flush_interval_secs.max(1))
    }
}

fn default_data_file() -> PathBuf { PathBuf::from("key_counts.json") }
fn default_flush_interval_secs() -> u64 { 5 }
fn default_true() -> bool { true }

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            flush_interval_secs: default_flush_interval_secs(),
            exit_on_escape: true,
            enhanced_keyboard: true,
        }
    }
}

/// How `keytally stats` presents the tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsMode {
    List,
    Keyboard,
}

/// `[stats]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsConfig {
    #[serde(default = "default_stats_mode")]
    pub mode: StatsMode,
    /// Rows shown in list mode; 0 shows every key.
    #[serde(default)]
    pub top_n: usize,
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_stats_mode() -> StatsMode { StatsMode::List }

impl StatsConfig {
    pub fn top_n(&self) -> Option<usize> {
        (self.top_n > 0).then_some(self.top_n)
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self { mode: default_stats_mode(), top_n: 0, color: true }
    }
}

/// `[logging]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String { "warn".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from the user config file, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load from an explicit file. A missing file falls back to defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// `$XDG_CONFIG_HOME/keytally/config.toml`, falling back to `~/.config`.
pub fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("keytally")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
