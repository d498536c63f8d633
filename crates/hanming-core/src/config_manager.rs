use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Failed to read config: {0}")]
    ReadError(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Upper bound on completion retries; the endpoint is not assumed idempotent.
pub const MAX_COMPLETION_RETRIES: u32 = 1;

/// Main configuration for Hanming
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HanmingConfig {
    /// Completion endpoint configuration
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Analysis orchestration settings
    #[serde(default)]
    pub analysis: AnalysisSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the single AI completion endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// When false every request resolves to its fallback default without a network call
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Full URL of the completion endpoint (all task variation travels in the prompt)
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,

    /// Per-call timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries on transport failure (0 or 1)
    #[serde(default)]
    pub max_retries: u32,

    /// Delay before the retry in milliseconds
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint_url: default_endpoint_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: 0,
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// Orchestration behaviour for comprehensive analyses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Issue the follow-up recommendations request after the four categories
    #[serde(default = "default_true")]
    pub include_recommendations: bool,

    /// Buffered events per subscriber before lagging ones drop messages
    #[serde(default = "default_notification_capacity")]
    pub notification_capacity: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            include_recommendations: true,
            notification_capacity: default_notification_capacity(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "pretty", "json", "compact"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Default value functions
fn default_endpoint_url() -> String {
    "http://localhost:8080/api/ai_completion".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_retry_backoff_ms() -> u64 {
    500
}
fn default_true() -> bool {
    true
}
fn default_notification_capacity() -> usize {
    16
}
fn default_log_level() -> String {
    "warn".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}

/// Configuration manager with layered sources
pub struct ConfigManager {
    config: HanmingConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Load configuration with the following precedence:
    /// 1. Environment variables (.env file)
    /// 2. Config file (.hanming.toml)
    /// 3. Sensible defaults
    pub fn load() -> Result<Self, ConfigError> {
        info!("🔧 Loading Hanming configuration...");

        Self::load_dotenv();

        let (config, config_path) = Self::load_config_file()?;
        Self::finish(config, config_path)
    }

    /// Load an explicit config file, still honouring environment overrides
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        Self::load_dotenv();

        let config = Self::read_toml_file(path)?;
        Self::finish(config, Some(path.to_path_buf()))
    }

    fn finish(config: HanmingConfig, config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config = Self::apply_env_overrides(config);
        Self::validate_config(&config)?;

        info!("✅ Configuration loaded successfully");
        if let Some(ref path) = config_path {
            info!("   📄 Config file: {}", path.display());
        } else {
            info!("   📄 Config file: NONE (using defaults)");
        }
        info!("   🌐 Completion endpoint: {}", config.completion.endpoint_url);
        info!("   ⏱  Timeout: {}s", config.completion.timeout_secs);

        Ok(Self {
            config,
            config_path,
        })
    }

    /// Load .env file if it exists
    fn load_dotenv() {
        if Path::new(".env").exists() {
            if let Err(e) = dotenv::from_filename(".env") {
                warn!("Failed to load .env file: {}", e);
            } else {
                info!("📋 Loaded .env file from current directory");
            }
            return;
        }

        if let Some(home) = dirs::home_dir() {
            let home_env = home.join(".hanming.env");
            if home_env.exists() {
                if let Err(e) = dotenv::from_path(&home_env) {
                    warn!("Failed to load .hanming.env: {}", e);
                } else {
                    info!("📋 Loaded .hanming.env from home directory");
                }
            }
        }
    }

    /// Find and load config file
    /// Search order:
    /// 1. ./.hanming.toml (current directory)
    /// 2. ~/.hanming/config.toml (user config)
    /// 3. Use defaults
    fn load_config_file() -> Result<(HanmingConfig, Option<PathBuf>), ConfigError> {
        let local_config = Path::new(".hanming.toml");
        if local_config.exists() {
            let config = Self::read_toml_file(local_config)?;
            return Ok((config, Some(local_config.to_path_buf())));
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".hanming").join("config.toml");
            if user_config.exists() {
                let config = Self::read_toml_file(&user_config)?;
                return Ok((config, Some(user_config)));
            }
        }

        info!("📋 No config file found, using defaults");
        Ok((HanmingConfig::default(), None))
    }

    /// Read TOML config file
    fn read_toml_file(path: &Path) -> Result<HanmingConfig, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: HanmingConfig) -> HanmingConfig {
        if let Ok(enabled) = std::env::var("HANMING_COMPLETION_ENABLED") {
            config.completion.enabled = enabled.to_lowercase() == "true" || enabled == "1";
        }
        if let Ok(url) = std::env::var("HANMING_COMPLETION_URL") {
            config.completion.endpoint_url = url;
        }
        if let Ok(timeout) = std::env::var("HANMING_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                config.completion.timeout_secs = secs;
            }
        }
        if let Ok(retries) = std::env::var("HANMING_MAX_RETRIES") {
            if let Ok(n) = retries.parse() {
                config.completion.max_retries = n;
            }
        }
        if let Ok(enabled) = std::env::var("HANMING_RECOMMENDATIONS") {
            config.analysis.include_recommendations =
                enabled.to_lowercase() == "true" || enabled == "1";
        }

        if let Ok(level) = std::env::var("HANMING_LOG_LEVEL") {
            config.logging.level = level;
        }

        config
    }

    /// Validate configuration
    pub fn validate_config(config: &HanmingConfig) -> Result<(), ConfigError> {
        let url = config.completion.endpoint_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid completion endpoint: '{}'. Must be an http(s) URL",
                url
            )));
        }

        if config.completion.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "Completion timeout must be at least 1 second".to_string(),
            ));
        }

        if config.completion.max_retries > MAX_COMPLETION_RETRIES {
            return Err(ConfigError::ValidationError(format!(
                "max_retries = {} exceeds the limit of {}",
                config.completion.max_retries, MAX_COMPLETION_RETRIES
            )));
        }

        if config.analysis.notification_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "notification_capacity must be greater than zero".to_string(),
            ));
        }

        match config.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    other
                )))
            }
        }

        match config.logging.format.as_str() {
            "pretty" | "json" | "compact" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log format: {}. Must be one of: pretty, json, compact",
                    other
                )))
            }
        }

        Ok(())
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &HanmingConfig {
        &self.config
    }

    /// Get the path to the config file that was loaded, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Create a default config file
    pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        let config = HanmingConfig::default();
        let toml_str =
            toml::to_string_pretty(&config).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::ReadError(e.to_string()))?;
        }

        std::fs::write(path, toml_str).map_err(|e| ConfigError::ReadError(e.to_string()))?;

        Ok(())
    }
}
