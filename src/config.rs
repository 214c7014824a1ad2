//! TOML configuration with environment override for the upstream credential.
//!
//! Lives at `~/.tonecraft/config.toml`; a commented default is written on
//! first run. `MISTRAL_API_KEY` in the environment always wins over the file.

use crate::error::ConfigError;
use crate::providers::CompletionParams;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Workspace directory — computed from home, not serialized.
    #[serde(skip)]
    pub workspace_dir: PathBuf,
    /// Path to config.toml — computed from home, not serialized.
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub history: HistoryConfig,
}

// ── Upstream completion provider ──────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Mistral API key. Prefer the MISTRAL_API_KEY environment variable.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.mistral.ai".into()
}

fn default_model() -> String {
    "mistral-small-latest".into()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn completion_params(&self) -> CompletionParams {
        CompletionParams {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

// ── Gateway ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    3001
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// ── History ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HistoryConfig {
    /// Override for the history file location; defaults to
    /// `<workspace>/history.json`.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

// ── Loading ───────────────────────────────────────────────────────

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# tonecraft configuration

[upstream]
# api_key = "..."            # prefer the MISTRAL_API_KEY environment variable
# base_url = "https://api.mistral.ai"
# model = "mistral-small-latest"
# temperature = 0.7
# max_tokens = 1000
# timeout_secs = 30

[gateway]
# host = "127.0.0.1"
# port = 3001

[history]
# file = "/path/to/history.json"
"#;

impl Config {
    /// Load the config, writing a commented default file on first run.
    pub fn load_or_init() -> Result<Self, ConfigError> {
        let home = UserDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .ok_or_else(|| ConfigError::Load("cannot determine home directory".into()))?;
        Self::load_from_workspace(home.join(".tonecraft"))
    }

    /// Load from an explicit workspace directory. Tests point this at a
    /// temporary directory.
    pub fn load_from_workspace(workspace_dir: PathBuf) -> Result<Self, ConfigError> {
        let config_path = workspace_dir.join("config.toml");

        if !config_path.exists() {
            fs::create_dir_all(&workspace_dir)?;
            fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        let raw = fs::read_to_string(&config_path)?;
        let mut config: Config =
            toml::from_str(&raw).map_err(|e| ConfigError::Load(e.to_string()))?;
        config.workspace_dir = workspace_dir;
        config.config_path = config_path;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Environment overrides: the credential is routinely supplied this way.
    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("MISTRAL_API_KEY") {
            let key = key.trim();
            if !key.is_empty() {
                self.upstream.api_key = Some(key.to_string());
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.upstream.temperature) {
            return Err(ConfigError::Validation(format!(
                "temperature {} outside 0.0..=2.0",
                self.upstream.temperature
            )));
        }
        if self.upstream.max_tokens == 0 {
            return Err(ConfigError::Validation("max_tokens must be positive".into()));
        }
        if self.upstream.timeout_secs == 0 {
            return Err(ConfigError::Validation("timeout_secs must be positive".into()));
        }
        Ok(())
    }

    /// Resolved history file location.
    pub fn history_file(&self) -> PathBuf {
        self.history
            .file
            .clone()
            .unwrap_or_else(|| self.workspace_dir.join("history.json"))
    }
}
