use std::io::Write;

use crosscheck_core::config::{DEFAULT_ANTHROPIC_MODEL, DEFAULT_FACT_CHECK_URL, DEFAULT_GEMINI_MODEL};
use crosscheck_core::{Config, ConfigError, Credential};

#[test]
fn test_config_from_toml() {
    let toml_str = r#"
[google]
api_key = "g-key"
search_cx = "engine"

[gemini]
api_key = "gem-key"

[anthropic]
model = "claude-3-opus"

[fact_check]
base_url = "http://localhost:9999/"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.google.api_key.as_deref(), Some("g-key"));
    assert_eq!(config.google.search_cx.as_deref(), Some("engine"));
    assert_eq!(config.gemini.model_or_default(), DEFAULT_GEMINI_MODEL);
    assert_eq!(config.anthropic.model_or_default(), "claude-3-opus");
    assert_eq!(config.fact_check.base_url_or_default(), "http://localhost:9999/");

    let report = config.check_credentials();
    assert_eq!(
        report.missing,
        vec![
            Credential::OpenAIApiKey,
            Credential::AnthropicApiKey,
            Credential::FactCheckApiKey
        ]
    );
}

#[test]
fn test_tuning_fields_from_toml() {
    let toml_str = r#"
[openai]
temperature = 0.5

[anthropic]
api_version = "2024-10-22"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.openai.temperature_or_default(), 0.5);
    assert_eq!(config.anthropic.api_version_or_default(), "2024-10-22");
}

#[test]
fn test_empty_file_uses_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config.anthropic.model_or_default(), DEFAULT_ANTHROPIC_MODEL);
    assert_eq!(config.fact_check.base_url_or_default(), DEFAULT_FACT_CHECK_URL);
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[fact_check]\nbase_url = \"http://127.0.0.1:7070\"").unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.fact_check.base_url_or_default(), "http://127.0.0.1:7070");
}

#[test]
fn test_from_file_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[openai\nmodel = ").unwrap();

    let result = Config::from_file(file.path());
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::from_file(dir.path().join("nope.toml"));
    assert!(matches!(result, Err(ConfigError::ReadError(_))));
}

#[test]
fn test_default_config_string_round_trips() {
    let rendered = Config::default_config_string();
    let parsed: Config = toml::from_str(&rendered).unwrap();
    assert_eq!(parsed.openai.model.as_deref(), Some("gpt-4o-mini"));
    assert!(parsed.openai.api_key.is_none());
}
