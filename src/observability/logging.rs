//! Structured logging configuration.

use crate::config::LoggingSettings;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Filter used when nothing else is configured.
const DEFAULT_FILTER: &str = "warn";

/// Filter used with `--verbose`.
const VERBOSE_FILTER: &str = "debug";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format name. Unknown names fall back to `Pretty`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug)]
pub struct LoggingConfig {
    /// Event filter.
    pub filter: EnvFilter,
    /// Output format.
    pub format: LogFormat,
    /// Log file; stderr when `None`.
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Builds logging configuration from settings.
    ///
    /// Filter precedence: `--verbose`, then `RUST_LOG`, then the configured
    /// level, then `warn`.
    #[must_use]
    pub fn from_settings(settings: Option<&LoggingSettings>, verbose: bool) -> Self {
        let directive = Self::filter_directive(
            settings.and_then(|s| s.level.as_deref()),
            std::env::var("RUST_LOG").ok().as_deref(),
            verbose,
        );
        let filter =
            EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        Self {
            filter,
            format: settings
                .and_then(|s| s.format.as_deref())
                .map(LogFormat::parse)
                .unwrap_or_default(),
            file: settings.and_then(|s| s.file.clone()),
        }
    }

    fn filter_directive(configured: Option<&str>, rust_log: Option<&str>, verbose: bool) -> String {
        if verbose {
            return VERBOSE_FILTER.to_string();
        }
        rust_log
            .filter(|v| !v.trim().is_empty())
            .or(configured)
            .unwrap_or(DEFAULT_FILTER)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("xml"), LogFormat::Pretty);
    }

    #[test]
    fn test_filter_precedence() {
        assert_eq!(
            LoggingConfig::filter_directive(Some("info"), Some("trace"), true),
            "debug"
        );
        assert_eq!(
            LoggingConfig::filter_directive(Some("info"), Some("trace"), false),
            "trace"
        );
        assert_eq!(
            LoggingConfig::filter_directive(Some("info"), Some(""), false),
            "info"
        );
        assert_eq!(LoggingConfig::filter_directive(None, None, false), "warn");
    }

    #[test]
    fn test_from_settings_format_and_file() {
        let settings = LoggingSettings {
            level: Some("info".to_string()),
            format: Some("json".to_string()),
            file: Some(PathBuf::from("/tmp/branchctx.log")),
        };
        let config = LoggingConfig::from_settings(Some(&settings), false);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.file, Some(PathBuf::from("/tmp/branchctx.log")));
    }
}
