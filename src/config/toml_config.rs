use crate::config::{
    DEFAULT_DECK_PATH, DEFAULT_ENDPOINT, DEFAULT_IMAGES_DIR, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
    DEFAULT_TIMEOUT_SECONDS,
};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, TarotError};
use crate::utils::validation::{
    validate_at_least, validate_endpoint, validate_non_empty_string, validate_path,
    validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File configuration. Every section and key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub deck: DeckConfig,
    pub llm: LlmConfig,
    pub session: SessionConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub path: Option<String>,
    pub images_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub temperature: Option<f32>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Fixed RNG seed for reproducible draws.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TarotError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses a TOML document after `${VAR}` substitution. An `api_key`
    /// naming an unset variable is treated as absent.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let mut config: Self =
            toml::from_str(&processed_content).map_err(|e| TarotError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        if config.llm.api_key.as_deref().is_some_and(is_unresolved_placeholder) {
            tracing::debug!("llm.api_key refers to an unset environment variable, ignoring it");
            config.llm.api_key = None;
        }

        Ok(config)
    }

    /// Replaces `${VAR}` with the variable's value. Unset variables are left
    /// as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TarotError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_level.as_deref())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("deck.path", self.deck_path())?;
        validate_path("deck.images_dir", self.images_dir())?;
        validate_endpoint("llm.endpoint", self.llm_endpoint())?;
        validate_non_empty_string("llm.model", self.model())?;
        validate_at_least("llm.timeout_seconds", self.timeout_seconds(), 1)?;
        validate_range("llm.temperature", self.temperature(), 0.0..=2.0)?;
        Ok(())
    }
}

fn is_unresolved_placeholder(value: &str) -> bool {
    value.starts_with("${") && value.ends_with('}')
}

impl ConfigProvider for TomlConfig {
    fn deck_path(&self) -> &str {
        self.deck.path.as_deref().unwrap_or(DEFAULT_DECK_PATH)
    }

    fn images_dir(&self) -> &str {
        self.deck.images_dir.as_deref().unwrap_or(DEFAULT_IMAGES_DIR)
    }

    fn llm_endpoint(&self) -> &str {
        self.llm.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    fn model(&self) -> &str {
        self.llm.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    fn api_key(&self) -> Option<&str> {
        self.llm.api_key.as_deref()
    }

    fn temperature(&self) -> f32 {
        self.llm.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    fn timeout_seconds(&self) -> u64 {
        self.llm.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn seed(&self) -> Option<u64> {
        self.session.seed
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
