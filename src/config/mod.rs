//! Configuration management.
//!
//! Sources, first match wins:
//! 1. An explicit `--config` path (or `MEMOLOG_CONFIG_PATH`)
//! 2. `memolog.toml` in the current directory
//! 3. `<config dir>/memolog/config.toml`
//! 4. Built-in defaults
//!
//! `MEMOLOG_DATA_DIR`, `MEMOLOG_PENDING_FILE` and `MEMOLOG_DONE_FILE` override
//! whatever the file says.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration for memolog.
#[derive(Debug, Clone)]
pub struct MemologConfig {
    /// Directory that relative ledger paths are resolved against.
    pub data_dir: PathBuf,
    /// Pending memo file, relative to `data_dir` unless absolute.
    pub pending_file: PathBuf,
    /// Done log file, relative to `data_dir` unless absolute.
    pub done_file: PathBuf,
    /// Logging settings from the config file.
    pub logging: LoggingSettings,
    /// Config files that contributed to this configuration.
    pub config_sources: Vec<PathBuf>,
    /// Config files that were found but failed to load, with the reason.
    pub skipped_sources: Vec<(PathBuf, String)>,
}

/// `[logging]` section of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `memolog=debug`.
    pub level: Option<String>,
    /// `pretty` or `json`.
    pub format: Option<String>,
    /// Log file path; logs go to stderr when unset.
    pub file: Option<String>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Data directory.
    pub data_dir: Option<String>,
    /// Pending memo file.
    pub pending_file: Option<String>,
    /// Done log file.
    pub done_file: Option<String>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
}

impl Default for MemologConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            pending_file: PathBuf::from(Self::DEFAULT_PENDING_FILE),
            done_file: PathBuf::from(Self::DEFAULT_DONE_FILE),
            logging: LoggingSettings::default(),
            config_sources: Vec::new(),
            skipped_sources: Vec::new(),
        }
    }
}

impl MemologConfig {
    /// Config file name looked up in the current directory.
    pub const LOCAL_CONFIG_FILE: &'static str = "memolog.toml";
    /// Default pending memo file name.
    pub const DEFAULT_PENDING_FILE: &'static str = "pending.txt";
    /// Default done log file name.
    pub const DEFAULT_DONE_FILE: &'static str = "done.txt";

    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::failed("read_config_file", format!("{}: {e}", path.display()))
        })?;

        let file: ConfigFile = toml::from_str(&contents).map_err(|e| {
            crate::Error::failed("parse_config_file", format!("{}: {e}", path.display()))
        })?;

        let mut config = Self::from_config_file(file);
        config.config_sources.push(path.to_path_buf());
        Ok(config)
    }

    /// Loads configuration from the default locations.
    ///
    /// Files that exist but fail to load are recorded in `skipped_sources`
    /// so they can be reported once logging is up.
    #[must_use]
    pub fn load_default() -> Self {
        let mut candidates = vec![PathBuf::from(Self::LOCAL_CONFIG_FILE)];
        if let Some(base_dirs) = directories::BaseDirs::new() {
            candidates.push(base_dirs.config_dir().join("memolog").join("config.toml"));
        }
        Self::load_first(candidates)
    }

    /// Loads the first candidate that exists and parses.
    fn load_first(candidates: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut skipped = Vec::new();
        let mut config = None;

        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(loaded) => {
                    config = Some(loaded);
                    break;
                },
                Err(e) => skipped.push((path, e.to_string())),
            }
        }

        let mut config = config.unwrap_or_default();
        config.skipped_sources = skipped;
        config
    }

    /// Converts a `ConfigFile` to `MemologConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(data_dir) = file.data_dir {
            config.data_dir = PathBuf::from(data_dir);
        }
        if let Some(pending_file) = file.pending_file {
            config.pending_file = PathBuf::from(pending_file);
        }
        if let Some(done_file) = file.done_file {
            config.done_file = PathBuf::from(done_file);
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        config
    }

    /// Applies `MEMOLOG_*` overrides from the process environment.
    #[must_use]
    pub fn apply_env_overrides(self) -> Self {
        self.apply_overrides_with(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    #[must_use]
    pub fn apply_overrides_with(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = get("MEMOLOG_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(file) = get("MEMOLOG_PENDING_FILE") {
            self.pending_file = PathBuf::from(file);
        }
        if let Some(file) = get("MEMOLOG_DONE_FILE") {
            self.done_file = PathBuf::from(file);
        }
        self
    }

    /// Resolved path of the pending memo file.
    #[must_use]
    pub fn pending_path(&self) -> PathBuf {
        self.data_dir.join(&self.pending_file)
    }

    /// Resolved path of the done log.
    #[must_use]
    pub fn done_path(&self) -> PathBuf {
        self.data_dir.join(&self.done_file)
    }

    /// Sets the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = path.into();
        self
    }

    /// Sets the pending memo file.
    #[must_use]
    pub fn with_pending_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.pending_file = path.into();
        self
    }

    /// Sets the done log file.
    #[must_use]
    pub fn with_done_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.done_file = path.into();
        self
    }
}
