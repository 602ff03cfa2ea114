//! Default values for crosscheck configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Config File Locations
// ============================================================================

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = "crosscheck.toml";

/// Directory under the user config dir holding `config.toml`.
pub const USER_CONFIG_DIR: &str = "crosscheck";

// ============================================================================
// Google Custom Search Defaults
// ============================================================================

/// Google APIs base URL (Custom Search lives under `/customsearch/v1`).
pub const DEFAULT_GOOGLE_SEARCH_URL: &str = "https://www.googleapis.com";

// ============================================================================
// Gemini Defaults
// ============================================================================

/// Generative Language API base URL.
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";

/// Default Gemini model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

// ============================================================================
// OpenAI Defaults
// ============================================================================

/// OpenAI API base URL.
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";

/// Default OpenAI model.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Sampling temperature sent with every chat completion.
pub const DEFAULT_OPENAI_TEMPERATURE: f32 = 0.2;

// ============================================================================
// Anthropic Defaults
// ============================================================================

/// Anthropic API base URL (messages live under `/messages`).
pub const DEFAULT_ANTHROPIC_URL: &str = "https://api.anthropic.com/v1";

/// Default Anthropic model.
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-sonnet-20240620";

/// Anthropic API version header value.
pub const DEFAULT_ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Maximum tokens requested from Claude.
pub const DEFAULT_ANTHROPIC_MAX_TOKENS: u32 = 512;

// ============================================================================
// Fact Check Defaults
// ============================================================================

/// Fact Check Tools API base URL.
pub const DEFAULT_FACT_CHECK_URL: &str = "https://factchecktools.googleapis.com";

/// Number of claims requested per query.
pub const DEFAULT_FACT_CHECK_PAGE_SIZE: u32 = 10;
