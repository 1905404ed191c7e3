//! Logging setup on top of the tracing ecosystem.
//!
//! # Environment Variables
//!
//! - `HELPAI_LOG`: Filter directive (like `RUST_LOG`), e.g., `helpai_core=debug`
//! - `HELPAI_LOG_FORMAT`: Output format for stderr: `pretty`, `json`, `compact`
//! - `HELPAI_LOG_DIR`: Directory for the rolling log file (default `~/.helpai/logs`)
//!
//! # Configuration
//!
//! ```toml
//! [logging]
//! level = "warn"
//! format = "pretty"
//!
//! [logging.file]
//! enabled = true
//! level = "debug"
//!
//! [logging.privacy]
//! log_prompts = false
//! truncate_length = 200
//! ```
//!
//! # Example
//!
//! ```no_run
//! use helpai_core::logging::{self, LoggingConfig};
//!
//! // Keep the guard alive for as long as file logging should flush.
//! let _guard = logging::init_logging(LoggingConfig::default())?;
//! # Ok::<(), helpai_core::Error>(())
//! ```

use crate::Error;
use crate::config::{FileLoggingConfig, LoggingConfig as ConfigLoggingConfig};
use std::env;
use std::io;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output format for stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Pretty, human-readable output with colors (default for TTY)
    #[default]
    Pretty,
    /// JSON output (one line per event)
    Json,
    /// Compact, single-line output
    Compact,
}

impl LogFormat {
    pub const VALUES: &[LogFormat] = &[LogFormat::Pretty, LogFormat::Json, LogFormat::Compact];

    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            "compact" => Some(LogFormat::Compact),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
            LogFormat::Compact => "compact",
        }
    }
}

/// Controls how question text shows up in logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivacyConfig {
    /// Include question text at all
    pub log_prompts: bool,
    /// Maximum chars kept when prompts are logged
    pub truncate_length: usize,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self { log_prompts: false, truncate_length: 200 }
    }
}

/// Runtime logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default log level when no env filter is set.
    pub level: String,
    /// Output format for stderr.
    pub format: LogFormat,
    /// Write to stderr at all. The TUI turns this off.
    pub stderr: bool,
    /// File logging configuration (optional).
    pub file: Option<FileLoggingConfig>,
    pub privacy: PrivacyConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::default(),
            stderr: true,
            file: None,
            privacy: PrivacyConfig::default(),
        }
    }
}

impl From<ConfigLoggingConfig> for LoggingConfig {
    fn from(config: ConfigLoggingConfig) -> Self {
        let format = LogFormat::parse_str(&config.format).unwrap_or_default();

        Self {
            level: config.level,
            format,
            stderr: true,
            file: if config.file.enabled { Some(config.file) } else { None },
            privacy: PrivacyConfig {
                log_prompts: config.privacy.log_prompts,
                truncate_length: config.privacy.truncate_length,
            },
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_stderr(mut self, enabled: bool) -> Self {
        self.stderr = enabled;
        self
    }

    pub fn with_file_logging(mut self, config: FileLoggingConfig) -> Self {
        self.file = Some(config);
        self
    }

    pub fn with_privacy(mut self, config: PrivacyConfig) -> Self {
        self.privacy = config;
        self
    }

    /// Filter directive: `HELPAI_LOG`, then `RUST_LOG`, then the configured level.
    fn filter_directive(&self) -> String {
        env::var("HELPAI_LOG")
            .ok()
            .or_else(|| env::var("RUST_LOG").ok())
            .unwrap_or_else(|| self.level.clone())
    }

    /// Filter directive for the log file: env overrides, then `[logging.file] level`.
    fn file_filter_directive(file: &FileLoggingConfig) -> String {
        env::var("HELPAI_LOG")
            .ok()
            .or_else(|| env::var("RUST_LOG").ok())
            .unwrap_or_else(|| file.level.clone())
    }

    fn is_tty() -> bool {
        atty::is(atty::Stream::Stderr)
    }

    /// Determine the appropriate format for stderr output.
    fn detect_format(&self) -> LogFormat {
        if let Ok(fmt_str) = env::var("HELPAI_LOG_FORMAT")
            && let Some(fmt) = LogFormat::parse_str(&fmt_str)
        {
            return fmt;
        }

        if self.format == LogFormat::Pretty && !Self::is_tty() { LogFormat::Compact } else { self.format }
    }

    /// Get the log directory path.
    fn log_dir(file: &FileLoggingConfig) -> Result<PathBuf, Error> {
        if let Ok(custom_dir) = env::var("HELPAI_LOG_DIR") {
            return Ok(PathBuf::from(custom_dir));
        }

        if let Some(ref dir) = file.directory {
            return Ok(dir.clone());
        }

        let home = env::var("HOME")
            .or_else(|_| env::var("USERPROFILE"))
            .map_err(|_| Error::Config("Could not determine home directory".to_string()))?;

        Ok(PathBuf::from(home).join(".helpai").join("logs"))
    }
}

/// Initialize the global tracing subscriber.
///
/// Stderr and the log file are filtered independently: stderr by the
/// `[logging] level`, the file by `[logging.file] level`. `HELPAI_LOG` or
/// `RUST_LOG` override both.
///
/// Returns the file writer's guard when file logging is enabled; dropping it
/// stops the background writer.
pub fn init_logging(config: LoggingConfig) -> Result<Option<WorkerGuard>, Error> {
    let stderr_layer = if config.stderr {
        let filter = parse_filter(&config.filter_directive())?;
        let layer = match config.detect_format() {
            LogFormat::Pretty => fmt::layer()
                .pretty()
                .with_writer(io::stderr)
                .with_ansi(true)
                .with_filter(filter)
                .boxed(),
            LogFormat::Json => fmt::layer().json().with_writer(io::stderr).with_filter(filter).boxed(),
            LogFormat::Compact => fmt::layer().compact().with_writer(io::stderr).with_filter(filter).boxed(),
        };
        Some(layer)
    } else {
        None
    };

    let (file_layer, guard) = match &config.file {
        Some(file_config) => {
            let filter = parse_filter(&LoggingConfig::file_filter_directive(file_config))?;
            let log_dir = LoggingConfig::log_dir(file_config)?;
            std::fs::create_dir_all(&log_dir)
                .map_err(|e| Error::Config(format!("Failed to create log directory: {}", e)))?;

            let file_appender = tracing_appender::rolling::daily(log_dir, "helpai.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer().json().with_writer(non_blocking).with_filter(filter).boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    Registry::default()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to install tracing subscriber: {}", e)))?;

    Ok(guard)
}

fn parse_filter(directive: &str) -> Result<EnvFilter, Error> {
    EnvFilter::try_new(directive).map_err(|e| Error::Config(format!("invalid log filter: {}", e)))
}

/// Render a question for logging according to privacy settings.
pub fn redact_prompt(prompt: &str, privacy: &PrivacyConfig) -> String {
    if !privacy.log_prompts {
        return format!("[REDACTED {} chars]", prompt.chars().count());
    }

    let total = prompt.chars().count();
    if total <= privacy.truncate_length {
        return prompt.to_string();
    }

    let mut truncated = prompt.chars().take(privacy.truncate_length).collect::<String>();
    truncated.push_str("...");
    truncated.push_str(&format!(" ({} total chars)", total));
    truncated
}
