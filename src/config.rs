use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::wizard::{default_steps, SequenceError, StepDescriptor, StepSequence};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub wizard: WizardConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Step sequence the wizard is built from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardConfig {
    #[serde(default = "default_steps")]
    pub steps: Vec<StepDescriptor>,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll timeout of the terminal loop
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// Mark optional steps in the step indicator
    #[serde(default = "default_show_optional_badge")]
    pub show_optional_badge: bool,
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_show_optional_badge() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            show_optional_badge: default_show_optional_badge(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for logs and other local state
    #[serde(default = "default_state_path")]
    pub state: String,
}

fn default_state_path() -> String {
    ".registrar".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state: default_state_path(),
        }
    }
}

impl Config {
    /// Path to the per-user config file
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("registrar").join("config.toml"))
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so registrar works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        // User config in ~/.config/registrar/ (optional global overrides)
        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with REGISTRAR__ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("REGISTRAR")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Validated step sequence for the wizard
    pub fn step_sequence(&self) -> Result<StepSequence, SequenceError> {
        StepSequence::new(self.wizard.steps.clone()).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected step sequence configuration");
        })
    }

    /// Get absolute path to state directory
    pub fn state_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.state);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }

    /// Get absolute path to logs directory
    pub fn logs_path(&self) -> PathBuf {
        self.state_path().join("logs")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wizard: WizardConfig::default(),
            ui: UiConfig::default(),
            logging: LoggingConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}
