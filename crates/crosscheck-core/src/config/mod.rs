//! Configuration management for crosscheck.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `crosscheck.toml` file
//! 3. User config `~/.config/crosscheck/config.toml`
//! 4. Built-in defaults (lowest priority)
//!
//! API keys are never written back out by [`Config::default_config_string`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Google Custom Search.
    pub google: GoogleSearchConfig,

    /// Gemini chat.
    pub gemini: GeminiConfig,

    /// OpenAI chat completions.
    pub openai: OpenAIConfig,

    /// Anthropic messages.
    pub anthropic: AnthropicConfig,

    /// Google Fact Check Tools claim search.
    pub fact_check: FactCheckConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./crosscheck.toml` (project local)
    /// 2. `~/.config/crosscheck/config.toml` (user config)
    /// 3. Falls back to defaults
    ///
    /// Environment overrides are applied in every case.
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(LOCAL_CONFIG_FILE).exists() {
            return Self::from_file(LOCAL_CONFIG_FILE);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(USER_CONFIG_DIR).join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Empty values are ignored so an exported-but-blank variable never
    /// clobbers a key from the config file.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        // Credentials
        if let Some(key) = get("GOOGLE_API_KEY") {
            self.google.api_key = Some(key);
        }
        if let Some(cx) = get("GOOGLE_SEARCH_CX") {
            self.google.search_cx = Some(cx);
        }
        if let Some(key) = get("GEMINI_API_KEY") {
            self.gemini.api_key = Some(key);
        }
        if let Some(key) = get("OPENAI_API_KEY") {
            self.openai.api_key = Some(key);
        }
        if let Some(key) = get("ANTHROPIC_API_KEY") {
            self.anthropic.api_key = Some(key);
        }
        if let Some(key) = get("FACT_CHECK_API_KEY") {
            self.fact_check.api_key = Some(key);
        }

        // Models
        if let Some(model) = get("GEMINI_MODEL") {
            self.gemini.model = Some(model);
        }
        if let Some(model) = get("OPENAI_MODEL") {
            self.openai.model = Some(model);
        }
        if let Some(model) = get("ANTHROPIC_MODEL") {
            self.anthropic.model = Some(model);
        }

        // Endpoints
        if let Some(url) = get("CROSSCHECK_GOOGLE_BASE_URL") {
            self.google.base_url = Some(url);
        }
        if let Some(url) = get("CROSSCHECK_GEMINI_BASE_URL") {
            self.gemini.base_url = Some(url);
        }
        if let Some(url) = get("CROSSCHECK_OPENAI_BASE_URL") {
            self.openai.base_url = Some(url);
        }
        if let Some(url) = get("CROSSCHECK_ANTHROPIC_BASE_URL") {
            self.anthropic.base_url = Some(url);
        }
        if let Some(url) = get("CROSSCHECK_FACT_CHECK_BASE_URL") {
            self.fact_check.base_url = Some(url);
        }
    }

    /// Reports which required credentials are missing.
    ///
    /// Nothing here touches the network; the report is meant to be taken
    /// once, up front, before a query is dispatched.
    pub fn check_credentials(&self) -> CredentialReport {
        let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());

        let missing = Credential::ALL
            .into_iter()
            .filter(|credential| {
                let value = match credential {
                    Credential::GoogleApiKey => &self.google.api_key,
                    Credential::GoogleSearchCx => &self.google.search_cx,
                    Credential::GeminiApiKey => &self.gemini.api_key,
                    Credential::OpenAIApiKey => &self.openai.api_key,
                    Credential::AnthropicApiKey => &self.anthropic.api_key,
                    Credential::FactCheckApiKey => &self.fact_check.api_key,
                };
                !present(value)
            })
            .collect();

        CredentialReport { missing }
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config {
            google: GoogleSearchConfig {
                base_url: Some(DEFAULT_GOOGLE_SEARCH_URL.to_string()),
                ..Default::default()
            },
            gemini: GeminiConfig {
                model: Some(DEFAULT_GEMINI_MODEL.to_string()),
                base_url: Some(DEFAULT_GEMINI_URL.to_string()),
                ..Default::default()
            },
            openai: OpenAIConfig {
                model: Some(DEFAULT_OPENAI_MODEL.to_string()),
                base_url: Some(DEFAULT_OPENAI_URL.to_string()),
                ..Default::default()
            },
            anthropic: AnthropicConfig {
                model: Some(DEFAULT_ANTHROPIC_MODEL.to_string()),
                api_version: Some(DEFAULT_ANTHROPIC_API_VERSION.to_string()),
                base_url: Some(DEFAULT_ANTHROPIC_URL.to_string()),
                ..Default::default()
            },
            fact_check: FactCheckConfig {
                base_url: Some(DEFAULT_FACT_CHECK_URL.to_string()),
                ..Default::default()
            },
        };
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// A named credential a provider needs before it can make its call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Credential {
    GoogleApiKey,
    GoogleSearchCx,
    GeminiApiKey,
    OpenAIApiKey,
    AnthropicApiKey,
    FactCheckApiKey,
}

impl Credential {
    /// Every credential, in display order.
    pub const ALL: [Credential; 6] = [
        Credential::GoogleApiKey,
        Credential::GoogleSearchCx,
        Credential::GeminiApiKey,
        Credential::OpenAIApiKey,
        Credential::AnthropicApiKey,
        Credential::FactCheckApiKey,
    ];

    /// Human-readable label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Credential::GoogleApiKey => "Google API key",
            Credential::GoogleSearchCx => "Google Search CX",
            Credential::GeminiApiKey => "Gemini API key",
            Credential::OpenAIApiKey => "OpenAI API key",
            Credential::AnthropicApiKey => "Anthropic API key",
            Credential::FactCheckApiKey => "Fact Check API key",
        }
    }

    /// Dotted path of the key in the config file.
    pub fn config_key(&self) -> &'static str {
        match self {
            Credential::GoogleApiKey => "google.api_key",
            Credential::GoogleSearchCx => "google.search_cx",
            Credential::GeminiApiKey => "gemini.api_key",
            Credential::OpenAIApiKey => "openai.api_key",
            Credential::AnthropicApiKey => "anthropic.api_key",
            Credential::FactCheckApiKey => "fact_check.api_key",
        }
    }

    /// Environment variable that overrides the config file.
    pub fn env_var(&self) -> &'static str {
        match self {
            Credential::GoogleApiKey => "GOOGLE_API_KEY",
            Credential::GoogleSearchCx => "GOOGLE_SEARCH_CX",
            Credential::GeminiApiKey => "GEMINI_API_KEY",
            Credential::OpenAIApiKey => "OPENAI_API_KEY",
            Credential::AnthropicApiKey => "ANTHROPIC_API_KEY",
            Credential::FactCheckApiKey => "FACT_CHECK_API_KEY",
        }
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of [`Config::check_credentials`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialReport {
    /// Credentials that are absent or blank.
    pub missing: Vec<Credential>,
}

impl CredentialReport {
    /// True when every credential is configured.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Whether a specific credential is missing.
    pub fn is_missing(&self, credential: Credential) -> bool {
        self.missing.contains(&credential)
    }
}

/// Google Custom Search configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleSearchConfig {
    /// API key.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Programmable Search Engine ID.
    #[serde(skip_serializing)]
    pub search_cx: Option<String>,

    /// Base URL override.
    pub base_url: Option<String>,
}

impl GoogleSearchConfig {
    pub fn base_url_or_default(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_GOOGLE_SEARCH_URL.to_string())
    }
}

/// Gemini configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API key.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Model name.
    pub model: Option<String>,

    /// Base URL override.
    pub base_url: Option<String>,
}

impl GeminiConfig {
    pub fn model_or_default(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string())
    }

    pub fn base_url_or_default(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_GEMINI_URL.to_string())
    }
}

/// OpenAI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAIConfig {
    /// API key.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Model name (defaults to `gpt-4o-mini`).
    pub model: Option<String>,

    /// Sampling temperature (defaults to 0.2).
    pub temperature: Option<f32>,

    /// Base URL override.
    pub base_url: Option<String>,
}

impl OpenAIConfig {
    pub fn model_or_default(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string())
    }

    pub fn temperature_or_default(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_OPENAI_TEMPERATURE)
    }

    pub fn base_url_or_default(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_OPENAI_URL.to_string())
    }
}

/// Anthropic configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnthropicConfig {
    /// API key.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Model name (defaults to `claude-3-5-sonnet-20240620`).
    pub model: Option<String>,

    /// `anthropic-version` header value.
    pub api_version: Option<String>,

    /// Base URL override.
    pub base_url: Option<String>,
}

impl AnthropicConfig {
    pub fn model_or_default(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| DEFAULT_ANTHROPIC_MODEL.to_string())
    }

    pub fn api_version_or_default(&self) -> String {
        self.api_version
            .clone()
            .unwrap_or_else(|| DEFAULT_ANTHROPIC_API_VERSION.to_string())
    }

    pub fn base_url_or_default(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_ANTHROPIC_URL.to_string())
    }
}

/// Fact Check Tools configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FactCheckConfig {
    /// API key.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Base URL override.
    pub base_url: Option<String>,
}

impl FactCheckConfig {
    pub fn base_url_or_default(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_FACT_CHECK_URL.to_string())
    }
}
