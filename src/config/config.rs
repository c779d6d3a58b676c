//! Config file handling

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::context::Environment;
use crate::errors::HttpcliError;

/// Overrides the directory holding `config.toml` and the per-session state files
pub const CONFIG_DIR_VAR: &str = "HTTPCLI_CONFIG_DIR";

/// Where session context is persisted between invocations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// One `<session>.env` file per session under the config directory
    #[default]
    File,
    /// `HTTPCLI_*` variables, re-exported through a shell script on stdout
    Env,
}

/// `[defaults]` table of config.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub store: Option<StoreKind>,
    pub pretty: bool,
    pub quiet: bool,
    /// Request timeout in seconds
    pub timeout: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    defaults: Defaults,
}

/// httpcli configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub config_dir: PathBuf,
    pub defaults: Defaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: Self::default_config_dir(),
            defaults: Defaults::default(),
        }
    }
}

impl Config {
    /// Load configuration from `<config-dir>/config.toml`
    ///
    /// A missing file yields the defaults. `config_dir` wins over
    /// `HTTPCLI_CONFIG_DIR`, which wins over the per-user config directory.
    pub fn load(env: &Environment, config_dir: Option<&Path>) -> Result<Self, HttpcliError> {
        Self::load_from(Self::resolve_dir(env, config_dir))
    }

    /// Directory the config file and session files live in
    pub fn resolve_dir(env: &Environment, config_dir: Option<&Path>) -> PathBuf {
        config_dir
            .map(Path::to_path_buf)
            .or_else(|| env.var(CONFIG_DIR_VAR).map(PathBuf::from))
            .unwrap_or_else(Self::default_config_dir)
    }

    /// Defaults only, rooted at `config_dir`
    pub fn with_dir(config_dir: PathBuf) -> Self {
        Self {
            config_dir,
            defaults: Defaults::default(),
        }
    }

    /// Load `config.toml` from an explicit directory
    pub fn load_from(config_dir: PathBuf) -> Result<Self, HttpcliError> {
        let config_file = config_dir.join("config.toml");

        if !config_file.exists() {
            return Ok(Self::with_dir(config_dir));
        }

        let content = std::fs::read_to_string(&config_file)
            .map_err(|e| HttpcliError::Config(format!("Failed to read config: {}", e)))?;

        let file: ConfigFile = toml::from_str(&content)
            .map_err(|e| HttpcliError::Config(format!("Invalid config TOML: {}", e)))?;

        if let Some(timeout) = file.defaults.timeout {
            if !timeout.is_finite() || timeout <= 0.0 {
                return Err(HttpcliError::Config(format!(
                    "defaults.timeout must be a positive number of seconds, got {}",
                    timeout
                )));
            }
        }

        Ok(Self {
            config_dir,
            defaults: file.defaults,
        })
    }

    /// Get the default config directory
    fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("http"))
            .unwrap_or_else(|| PathBuf::from(".http"))
    }

    /// Directory holding the per-session `.env` files
    pub fn sessions_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.defaults.timeout.map(Duration::from_secs_f64)
    }
}
