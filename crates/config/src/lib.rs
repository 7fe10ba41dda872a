//! Configuration loading, validation, and management for Pagewright.
//!
//! Loads configuration from `~/.pagewright/config.toml` with environment
//! variable overrides. Validates all settings at startup.
//!
//! Two model endpoints are configured independently: the **agent** that
//! drives the build loop and the **tools** that generate page content.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.pagewright/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Conversational model that drives the build loop
    #[serde(default)]
    pub agent: AgentConfig,

    /// Single-shot model used by the content tools and the final reviewer
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Where built pages are written
    #[serde(default)]
    pub pages: PagesConfig,

    /// Provider-specific configurations
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

/// Settings for the build-loop model.
#[derive(Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_agent_provider")]
    pub provider: String,

    #[serde(default = "default_agent_model")]
    pub model: String,

    #[serde(default = "default_agent_temperature")]
    pub temperature: f32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Hard cap on model round-trips per build
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

fn default_agent_provider() -> String {
    "openai".into()
}
fn default_agent_model() -> String {
    "gpt-3.5-turbo".into()
}
fn default_agent_temperature() -> f32 {
    0.0
}
fn default_max_iterations() -> u32 {
    10
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            provider: default_agent_provider(),
            model: default_agent_model(),
            temperature: default_agent_temperature(),
            max_tokens: None,
            max_iterations: default_max_iterations(),
        }
    }
}

/// Settings for the content-generation model.
#[derive(Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_tools_provider")]
    pub provider: String,

    #[serde(default = "default_tools_model")]
    pub model: String,

    #[serde(default = "default_tools_temperature")]
    pub temperature: f32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Target length for `essay_writer`
    #[serde(default = "default_essay_words")]
    pub essay_words: u32,
}

fn default_tools_provider() -> String {
    "groq".into()
}
fn default_tools_model() -> String {
    "llama3-8b-8192".into()
}
fn default_tools_temperature() -> f32 {
    0.7
}
fn default_essay_words() -> u32 {
    500
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            provider: default_tools_provider(),
            model: default_tools_model(),
            temperature: default_tools_temperature(),
            max_tokens: None,
            essay_words: default_essay_words(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagesConfig {
    #[serde(default = "default_pages_dir")]
    pub dir: PathBuf,

    /// Run the final reviewer even when no code was generated
    #[serde(default)]
    pub normalize_empty_code: bool,
}

fn default_pages_dir() -> PathBuf {
    PathBuf::from("pages")
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            dir: default_pages_dir(),
            normalize_empty_code: false,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("agent", &self.agent)
            .field("tools", &self.tools)
            .field("pages", &self.pages)
            .field("providers", &self.providers)
            .finish()
    }
}

impl std::fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentConfig")
            .field("api_key", &redact(&self.api_key))
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("max_iterations", &self.max_iterations)
            .finish()
    }
}

impl std::fmt::Debug for ToolsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolsConfig")
            .field("api_key", &redact(&self.api_key))
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("essay_words", &self.essay_words)
            .finish()
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.pagewright/config.toml).
    ///
    /// Environment overrides:
    /// - `PAGEWRIGHT_API_KEY`, then `OPENAI_API_KEY` for the agent
    /// - `GROQ_API_KEY` for the tools
    /// - `PAGEWRIGHT_MODEL` for the agent model
    /// - `PAGEWRIGHT_PAGES_DIR` for the output directory
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides through a lookup function.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.agent.api_key.is_none() {
            self.agent.api_key =
                lookup("PAGEWRIGHT_API_KEY").or_else(|| lookup("OPENAI_API_KEY"));
        }
        if self.tools.api_key.is_none() {
            self.tools.api_key = lookup("GROQ_API_KEY");
        }
        if let Some(model) = lookup("PAGEWRIGHT_MODEL") {
            self.agent.model = model;
        }
        if let Some(dir) = lookup("PAGEWRIGHT_PAGES_DIR") {
            self.pages.dir = PathBuf::from(dir);
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".pagewright")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        for (label, temp) in [
            ("agent.temperature", self.agent.temperature),
            ("tools.temperature", self.tools.temperature),
        ] {
            if !(0.0..=2.0).contains(&temp) {
                return Err(ConfigError::ValidationError(format!(
                    "{label} must be between 0.0 and 2.0"
                )));
            }
        }

        if self.agent.max_iterations == 0 {
            return Err(ConfigError::ValidationError(
                "agent.max_iterations must be at least 1".into(),
            ));
        }

        if self.agent.model.trim().is_empty() || self.tools.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "agent.model and tools.model must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            agent: AgentConfig::default(),
            tools: ToolsConfig::default(),
            pages: PagesConfig::default(),
            providers: HashMap::new(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.agent.provider, "openai");
        assert_eq!(config.agent.max_iterations, 10);
        assert_eq!(config.tools.provider, "groq");
        assert_eq!(config.tools.essay_words, 500);
        assert!(!config.pages.normalize_empty_code);
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.agent.model, config.agent.model);
        assert_eq!(parsed.tools.model, config.tools.model);
    }

    #[test]
    fn invalid_temperature_rejected() {
        let mut config = AppConfig::default();
        config.tools.temperature = 5.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_iterations_rejected() {
        let mut config = AppConfig::default();
        config.agent.max_iterations = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.agent.model, "gpt-3.5-turbo");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[agent]\nmodel = \"gpt-4o\"\nmax_iterations = 4\n\n[pages]\ndir = \"out\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.agent.model, "gpt-4o");
        assert_eq!(config.agent.max_iterations, 4);
        assert_eq!(config.agent.provider, "openai");
        assert_eq!(config.pages.dir, PathBuf::from("out"));
        assert_eq!(config.tools.model, "llama3-8b-8192");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[agent\nmodel = ").unwrap();
        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn env_overrides_fill_missing_keys() {
        let mut config = AppConfig::default();
        config.apply_env(|key| match key {
            "OPENAI_API_KEY" => Some("sk-agent".into()),
            "GROQ_API_KEY" => Some("gsk-tools".into()),
            "PAGEWRIGHT_PAGES_DIR" => Some("/tmp/pages".into()),
            _ => None,
        });
        assert_eq!(config.agent.api_key.as_deref(), Some("sk-agent"));
        assert_eq!(config.tools.api_key.as_deref(), Some("gsk-tools"));
        assert_eq!(config.pages.dir, PathBuf::from("/tmp/pages"));
    }

    #[test]
    fn env_does_not_replace_file_key() {
        let mut config = AppConfig::default();
        config.agent.api_key = Some("from-file".into());
        config.apply_env(|_| Some("from-env".into()));
        assert_eq!(config.agent.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn debug_output_redacts_keys() {
        let mut config = AppConfig::default();
        config.agent.api_key = Some("sk-secret".into());
        let dbg = format!("{config:?}");
        assert!(!dbg.contains("sk-secret"));
        assert!(dbg.contains("[REDACTED]"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("gpt-3.5-turbo"));
        assert!(toml_str.contains("llama3-8b-8192"));
    }
}
