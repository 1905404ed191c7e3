use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::Variation;
use crate::error::Result;
use crate::widget::FALLBACK_MESSAGE;

/// Styling flag passed through to the button and modal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const VALUES: &[Theme] = &[Theme::Light, Theme::Dark];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = crate::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(crate::Error::Config(ConfigError::InvalidTheme(s.to_string()).to_string())),
        }
    }
}

/// Where suggestion queries are sent
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointConfig {
    /// GraphQL endpoint URL
    #[serde(default = "default_endpoint_url")]
    pub url: String,

    /// Sent as `x-api-key` when present
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-attempt timeout
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Total attempts per query (1 = no retry)
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Delay before the first retry; doubles afterwards
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_endpoint_url() -> String {
    "http://localhost:4000/graphql".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_retry_count() -> u32 {
    1
}

fn default_retry_delay_ms() -> u64 {
    500
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: default_endpoint_url(),
            api_key: None,
            timeout_ms: default_timeout_ms(),
            retry_count: default_retry_count(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// Widget defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WidgetConfig {
    #[serde(default)]
    pub theme: Theme,

    /// Persona selected when the widget starts
    #[serde(default)]
    pub variation: Variation,

    /// Building to scope questions to; "NA" is sent when unset
    #[serde(default)]
    pub building_id: Option<String>,

    /// `limit` variable sent with every query
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Line shown when a question cannot be answered
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
}

fn default_limit() -> u32 {
    1000
}

fn default_fallback_message() -> String {
    FALLBACK_MESSAGE.to_string()
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            variation: Variation::default(),
            building_id: None,
            limit: default_limit(),
            fallback_message: default_fallback_message(),
        }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `pretty`, `json` or `compact`
    #[serde(default = "default_log_format")]
    pub format: String,

    #[serde(default)]
    pub file: FileLoggingConfig,

    #[serde(default)]
    pub privacy: PrivacyLoggingConfig,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: FileLoggingConfig::default(),
            privacy: PrivacyLoggingConfig::default(),
        }
    }
}

/// `[logging.file]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileLoggingConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_file_log_level")]
    pub level: String,

    /// Overrides `~/.helpai/logs`
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

fn default_file_log_level() -> String {
    "debug".to_string()
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self { enabled: false, level: default_file_log_level(), directory: None }
    }
}

/// `[logging.privacy]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrivacyLoggingConfig {
    /// Include question text in debug logs
    #[serde(default)]
    pub log_prompts: bool,

    #[serde(default = "default_truncate_length")]
    pub truncate_length: usize,
}

fn default_truncate_length() -> usize {
    200
}

impl Default for PrivacyLoggingConfig {
    fn default() -> Self {
        Self { log_prompts: false, truncate_length: default_truncate_length() }
    }
}

/// Root configuration structure for helpai.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,

    #[serde(default)]
    pub widget: WidgetConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str)
            .map_err(|e| crate::Error::Config(ConfigError::from(e).to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        use crate::Error;

        if !has_http_host(self.endpoint.url.trim()) {
            return Err(Error::Config(ConfigError::InvalidEndpoint(self.endpoint.url.clone()).to_string()));
        }

        if self.endpoint.timeout_ms == 0 {
            return Err(Error::Config(
                ConfigError::ZeroValue("endpoint.timeout_ms".to_string()).to_string(),
            ));
        }

        if self.endpoint.retry_count == 0 {
            return Err(Error::Config(
                ConfigError::ZeroValue("endpoint.retry_count".to_string()).to_string(),
            ));
        }

        if self.widget.fallback_message.trim().is_empty() {
            return Err(Error::Config(ConfigError::EmptyFallback.to_string()));
        }

        Ok(())
    }

    /// Get example configuration (as a string)
    pub fn example() -> &'static str {
        r#"# HelpAI Configuration Example
# Copy this file to helpai.toml and customize as needed

[endpoint]
# GraphQL endpoint serving getAISuggestion
url = "https://api.example.com/graphql"
# API key sent as x-api-key (optional)
# api_key = "your-api-key-here"
# Per-attempt timeout in milliseconds
timeout_ms = 30000
# Total attempts per question (1 = no retry)
retry_count = 1
retry_delay_ms = 500

[widget]
# Theme: "light" or "dark"
theme = "light"
# Persona selected at startup: "generic" or "insight"
variation = "generic"
# Building to scope questions to (optional; "NA" is sent when unset)
# building_id = "your-building-id"
limit = 1000
fallback_message = "I am unable to answer that. Please try again or contact support."

[logging]
level = "warn"
format = "pretty"

[logging.file]
enabled = false
level = "debug"

[logging.privacy]
log_prompts = false
truncate_length = 200
"#
    }
}

/// `http(s)://` followed by a non-empty host
fn has_http_host(url: &str) -> bool {
    let Some(rest) = url.strip_prefix("http://").or_else(|| url.strip_prefix("https://")) else {
        return false;
    };
    rest.split(['/', '?', '#']).next().is_some_and(|host| !host.is_empty())
}

/// Configuration-specific errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid theme
    #[error("invalid theme: {0}")]
    InvalidTheme(String),

    /// Endpoint is not an http(s) URL
    #[error("endpoint url must start with http:// or https:// and name a host: {0}")]
    InvalidEndpoint(String),

    /// A numeric setting that must be positive
    #[error("{0} must be greater than zero")]
    ZeroValue(String),

    /// Blank fallback message
    #[error("widget.fallback_message must not be empty")]
    EmptyFallback,

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    TomlParse(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::TomlParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_theme_from_str() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_theme_default() {
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(Theme::VALUES.len(), 2);
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.endpoint.url, "http://localhost:4000/graphql");
        assert_eq!(config.endpoint.retry_count, 1);
        assert_eq!(config.widget.limit, 1000);
        assert_eq!(config.widget.variation, Variation::Generic);
        assert_eq!(config.widget.fallback_message, FALLBACK_MESSAGE);
        assert_eq!(config.logging.level, "warn");
        assert!(!config.logging.file.enabled);
    }

    #[test]
    fn test_config_from_empty_toml() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.widget.theme, Theme::Light);
        assert!(config.widget.building_id.is_none());
    }

    #[test]
    fn test_config_from_toml_str() {
        let toml_str = r#"
[endpoint]
url = "https://api.example.com/graphql"
api_key = "secret"
timeout_ms = 5000
retry_count = 3

[widget]
theme = "dark"
variation = "insight"
building_id = "bldg-9"
"#;
        let config = Config::from_toml_str(toml_str).unwrap();
        assert_eq!(config.endpoint.api_key.as_deref(), Some("secret"));
        assert_eq!(config.endpoint.timeout_ms, 5000);
        assert_eq!(config.endpoint.retry_count, 3);
        assert_eq!(config.endpoint.retry_delay_ms, 500);
        assert_eq!(config.widget.theme, Theme::Dark);
        assert_eq!(config.widget.variation, Variation::Insight);
        assert_eq!(config.widget.building_id.as_deref(), Some("bldg-9"));
        assert_eq!(config.widget.limit, 1000);
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let result = Config::from_toml_str("[widget]\npersona = \"generic\"\n");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("TOML parse error"));
    }

    #[test]
    fn test_config_rejects_bad_variation() {
        assert!(Config::from_toml_str("[widget]\nvariation = \"expert\"\n").is_err());
    }

    #[test]
    fn test_config_validation_endpoint_scheme() {
        let err = Config::from_toml_str("[endpoint]\nurl = \"ftp://example.com\"\n").unwrap_err();
        assert!(err.to_string().contains("must start with http"));
    }

    #[test]
    fn test_config_validation_endpoint_host() {
        for url in ["http://", "https://", "https:///path", "http://?q=1"] {
            let toml = format!("[endpoint]\nurl = \"{url}\"\n");
            assert!(Config::from_toml_str(&toml).is_err(), "{url} should be rejected");
        }
        assert!(Config::from_toml_str("[endpoint]\nurl = \"http://localhost:8080/ask\"\n").is_ok());
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let err = Config::from_toml_str("[endpoint]\ntimeout_ms = 0\n").unwrap_err();
        assert!(err.to_string().contains("endpoint.timeout_ms must be greater than zero"));
    }

    #[test]
    fn test_config_validation_zero_retry_count() {
        assert!(Config::from_toml_str("[endpoint]\nretry_count = 0\n").is_err());
    }

    #[test]
    fn test_config_validation_empty_fallback() {
        let err = Config::from_toml_str("[widget]\nfallback_message = \"  \"\n").unwrap_err();
        assert!(err.to_string().contains("fallback_message"));
    }

    #[test]
    fn test_config_example_parses() {
        let config = Config::from_toml_str(Config::example()).unwrap();
        assert_eq!(config.endpoint.url, "https://api.example.com/graphql");
        assert_eq!(config.widget.fallback_message, FALLBACK_MESSAGE);
    }

    #[test]
    fn test_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[widget]\ntheme = \"dark\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.widget.theme, Theme::Dark);
    }

    #[test]
    fn test_config_from_missing_file() {
        let err = Config::from_file(Path::new("/nonexistent/helpai.toml")).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(ConfigError::InvalidTheme("x".to_string()).to_string(), "invalid theme: x");
        assert_eq!(
            ConfigError::EmptyFallback.to_string(),
            "widget.fallback_message must not be empty"
        );
    }
}
