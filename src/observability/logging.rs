//! Structured logging configuration.

use crate::config::LoggingSettings;
use std::path::PathBuf;

/// Output format for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format name; unknown names fall back to `Pretty`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive string.
    pub filter: String,
    /// Output format.
    pub format: LogFormat,
    /// Log file; stderr when `None`.
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Default filter when nothing else is configured.
    pub const DEFAULT_FILTER: &'static str = "warn";
    /// Filter used with `--verbose`.
    pub const VERBOSE_FILTER: &'static str = "memolog=debug,info";

    /// Builds logging config from file settings and the process environment.
    ///
    /// Precedence for the filter: `MEMOLOG_LOG`, then `--verbose`, then the
    /// file's `level`, then `warn`.
    #[must_use]
    pub fn from_settings(settings: Option<&LoggingSettings>, verbose: bool) -> Self {
        Self::from_settings_with(settings, verbose, |key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_settings`] with an explicit variable lookup.
    #[must_use]
    pub fn from_settings_with(
        settings: Option<&LoggingSettings>,
        verbose: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let filter = get("MEMOLOG_LOG")
            .or_else(|| verbose.then(|| Self::VERBOSE_FILTER.to_string()))
            .or_else(|| settings.and_then(|s| s.level.clone()))
            .unwrap_or_else(|| Self::DEFAULT_FILTER.to_string());

        let format = get("MEMOLOG_LOG_FORMAT")
            .or_else(|| settings.and_then(|s| s.format.clone()))
            .map(|f| LogFormat::parse(&f))
            .unwrap_or_default();

        let file = get("MEMOLOG_LOG_FILE")
            .or_else(|| settings.and_then(|s| s.file.clone()))
            .map(PathBuf::from);

        Self {
            filter,
            format,
            file,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: Self::DEFAULT_FILTER.to_string(),
            format: LogFormat::default(),
            file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let config = LoggingConfig::from_settings_with(None, false, no_env);
        assert_eq!(config, LoggingConfig::default());
    }

    #[test]
    fn test_verbose_beats_file_level() {
        let settings = LoggingSettings {
            level: Some("error".to_string()),
            ..Default::default()
        };
        let config = LoggingConfig::from_settings_with(Some(&settings), true, no_env);
        assert_eq!(config.filter, LoggingConfig::VERBOSE_FILTER);
    }

    #[test]
    fn test_env_beats_everything() {
        let settings = LoggingSettings {
            level: Some("error".to_string()),
            format: Some("pretty".to_string()),
            file: Some("/tmp/a.log".to_string()),
        };
        let config = LoggingConfig::from_settings_with(Some(&settings), true, |key| match key {
            "MEMOLOG_LOG" => Some("trace".to_string()),
            "MEMOLOG_LOG_FORMAT" => Some("JSON".to_string()),
            "MEMOLOG_LOG_FILE" => Some("/tmp/b.log".to_string()),
            _ => None,
        });
        assert_eq!(config.filter, "trace");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.file, Some(PathBuf::from("/tmp/b.log")));
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" Json "), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("xml"), LogFormat::Pretty);
    }
}
