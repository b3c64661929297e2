//! # Logging & Tracing Infrastructure
//!
//! Configures structured logging with the `tracing` crate, supporting:
//! - JSON, compact and pretty-print output formats
//! - Module-level filtering via `EnvFilter`
//! - Redaction helpers for tokens and emails
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::logging::{init_logging, LogFormat, LogLevel, LoggingConfig};
//!
//! let config = LoggingConfig::default()
//!     .with_format(LogFormat::Pretty)
//!     .with_level(LogLevel::Debug);
//!
//! init_logging(config).expect("Failed to initialize logging");
//!
//! tracing::info!("Listing started");
//! ```

use crate::error::{Error, Result};

use std::io;
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with colors
    Pretty,
    /// Structured JSON format for machine parsing
    Json,
    /// Compact format for production
    Compact,
}

impl Default for LogFormat {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        return Self::Pretty;

        #[cfg(not(debug_assertions))]
        return Self::Json;
    }
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Minimum log level for workspace crates
    pub level: LogLevel,
    /// Custom filter string (e.g., "provider_onedrive=trace,bridge_desktop=debug")
    pub filter: Option<String>,
    /// Emit span enter/exit events and span context
    pub enable_spans: bool,
    /// Display target module in logs
    pub display_target: bool,
    /// Display thread info
    pub display_thread_info: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: LogLevel::Info,
            filter: None,
            enable_spans: true,
            display_target: true,
            display_thread_info: false,
        }
    }
}

impl LoggingConfig {
    /// Set log format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set minimum log level
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set custom filter string
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Enable or disable span contexts
    pub fn with_spans(mut self, enable: bool) -> Self {
        self.enable_spans = enable;
        self
    }

    /// Enable or disable target display
    pub fn with_target(mut self, display: bool) -> Self {
        self.display_target = display;
        self
    }

    /// Enable or disable thread info
    pub fn with_thread_info(mut self, display: bool) -> Self {
        self.display_thread_info = display;
        self
    }
}

/// Initialize the logging system
///
/// Call once during application startup. A second call fails because the
/// global subscriber is already set.
///
/// # Errors
///
/// Returns [`Error::Config`] if the filter is invalid or logging is already
/// initialized.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = build_filter(&config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_target(config.display_target)
                    .with_thread_ids(config.display_thread_info)
                    .with_thread_names(config.display_thread_info)
                    .with_span_events(span_events(&config))
                    .with_writer(io::stdout),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(config.enable_spans)
                    .with_span_list(config.enable_spans)
                    .with_target(config.display_target)
                    .with_thread_ids(config.display_thread_info)
                    .with_thread_names(config.display_thread_info)
                    .with_writer(io::stdout),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(config.display_target)
                    .with_thread_ids(config.display_thread_info)
                    .with_thread_names(config.display_thread_info)
                    .with_span_events(span_events(&config))
                    .with_writer(io::stdout),
            )
            .try_init(),
    };

    result.map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))
}

fn span_events(config: &LoggingConfig) -> tracing_subscriber::fmt::format::FmtSpan {
    if config.enable_spans {
        tracing_subscriber::fmt::format::FmtSpan::ACTIVE
    } else {
        tracing_subscriber::fmt::format::FmtSpan::NONE
    }
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let filter_string = if let Some(custom_filter) = &config.filter {
        custom_filter.clone()
    } else {
        // Workspace crates at the configured level, everything else at warn
        let level = config.level.as_directive();
        format!(
            "warn,mediadrive_workspace={level},core_runtime={level},\
             provider_onedrive={level},bridge_traits={level},bridge_desktop={level},\
             h2=warn,hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn",
            level = level
        )
    };

    EnvFilter::try_new(filter_string)
        .map_err(|e| Error::Config(format!("Invalid log filter: {}", e)))
}

/// Helper function to redact sensitive field values
///
/// ```ignore
/// use tracing::debug;
/// use core_runtime::logging::redact_if_sensitive;
///
/// debug!(authorization = %redact_if_sensitive("authorization", &header), "Prepared request");
/// ```
pub fn redact_if_sensitive(field_name: &str, value: &str) -> String {
    const SENSITIVE_FIELDS: &[&str] = &[
        "token",
        "access_token",
        "refresh_token",
        "password",
        "secret",
        "authorization",
        "bearer",
    ];

    let field_lower = field_name.to_lowercase();
    if SENSITIVE_FIELDS.iter().any(|&f| field_lower.contains(f)) {
        "[REDACTED]".to_string()
    } else if let Some(at_pos) = value.find('@').filter(|_| value.contains('.')) {
        // Likely an email, keep the first char only
        let first = value.chars().next().filter(|_| at_pos > 0);
        format!("{}***@[REDACTED]", first.map(String::from).unwrap_or_default())
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_builder() {
        let config = LoggingConfig::default()
            .with_format(LogFormat::Json)
            .with_level(LogLevel::Debug)
            .with_filter("provider_onedrive=trace")
            .with_spans(false)
            .with_target(true)
            .with_thread_info(true);

        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.filter, Some("provider_onedrive=trace".to_string()));
        assert!(!config.enable_spans);
        assert!(config.display_target);
        assert!(config.display_thread_info);
    }

    #[test]
    fn test_redact_if_sensitive() {
        assert_eq!(
            redact_if_sensitive("access_token", "secret123"),
            "[REDACTED]"
        );
        assert_eq!(redact_if_sensitive("Authorization", "Bearer x"), "[REDACTED]");

        let redacted = redact_if_sensitive("email", "user@example.com");
        assert!(redacted.starts_with('u'));
        assert!(redacted.contains("[REDACTED]"));
        assert!(!redacted.contains("example.com"));

        assert_eq!(redact_if_sensitive("item_id", "A1"), "A1");
        assert_eq!(redact_if_sensitive("name", "clip.mp4"), "clip.mp4");
    }

    #[test]
    fn test_redact_email_with_multibyte_first_char() {
        let redacted = redact_if_sensitive("email", "é@x.com");
        assert_eq!(redacted, "é***@[REDACTED]");

        let redacted = redact_if_sensitive("owner", "日本@example.jp");
        assert_eq!(redacted, "日***@[REDACTED]");

        assert_eq!(redact_if_sensitive("email", "@x.com"), "***@[REDACTED]");
    }

    #[test]
    fn test_default_format() {
        #[cfg(debug_assertions)]
        assert_eq!(LogFormat::default(), LogFormat::Pretty);

        #[cfg(not(debug_assertions))]
        assert_eq!(LogFormat::default(), LogFormat::Json);
    }

    #[test]
    fn test_build_filter() {
        let config = LoggingConfig::default().with_level(LogLevel::Debug);
        let filter = build_filter(&config).unwrap().to_string();
        for target in [
            "mediadrive_workspace",
            "core_runtime",
            "provider_onedrive",
            "bridge_traits",
            "bridge_desktop",
        ] {
            assert!(filter.contains(&format!("{}=debug", target)), "{}", filter);
        }
        assert!(filter.contains("reqwest=warn"));
    }

    #[test]
    fn test_build_custom_filter() {
        let config = LoggingConfig::default().with_filter("provider_onedrive=trace");
        let filter = build_filter(&config).unwrap();
        assert!(filter.to_string().contains("provider_onedrive=trace"));
    }

    #[test]
    fn test_build_filter_rejects_garbage() {
        let config = LoggingConfig::default().with_filter("provider_onedrive=notalevel[");
        assert!(build_filter(&config).is_err());
    }
}
