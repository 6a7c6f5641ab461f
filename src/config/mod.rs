//! Configuration management.
//!
//! Sources, later ones overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. A TOML file (explicit path, `BRANCHCTX_CONFIG_PATH`, or the platform
//!    config directory)
//! 3. `BRANCHCTX_*` environment variables
//!
//! ```toml
//! repo_path = "."
//! data_dir = ".branch_data"
//! git_binary = "git"
//!
//! [logging]
//! level = "info"
//! format = "json"
//! file = "/tmp/branchctx.log"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "BRANCHCTX_CONFIG_PATH";

/// Main configuration for branchctx.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchCtxConfig {
    /// Repository the git commands run in.
    pub repo_path: PathBuf,
    /// Storage root holding one directory per branch.
    pub data_dir: PathBuf,
    /// git executable name or path.
    pub git_binary: String,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Logging settings from the config file or environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `branchctx=debug`.
    pub level: Option<String>,
    /// `pretty` or `json`.
    pub format: Option<String>,
    /// Append logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Repository path.
    pub repo_path: Option<String>,
    /// Storage root.
    pub data_dir: Option<String>,
    /// git executable.
    pub git_binary: Option<String>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
}

impl Default for BranchCtxConfig {
    fn default() -> Self {
        Self {
            repo_path: PathBuf::from("."),
            data_dir: PathBuf::from(".branch_data"),
            git_binary: "git".to_string(),
            logging: LoggingSettings::default(),
        }
    }
}

impl BranchCtxConfig {
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
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid config file.
    pub fn from_toml_str(contents: &str) -> crate::Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/branchctx/` on macOS)
    /// 2. XDG config dir (`~/.config/branchctx/`)
    ///
    /// Returns default configuration if no config file is found or readable.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let candidates = [
            base_dirs.config_dir().join("branchctx").join("config.toml"),
            base_dirs
                .home_dir()
                .join(".config")
                .join("branchctx")
                .join("config.toml"),
        ];

        for path in candidates {
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
                    },
                }
            }
        }

        Self::default()
    }

    /// Loads configuration for the process.
    ///
    /// An explicit `path` wins, then `BRANCHCTX_CONFIG_PATH`, then the default
    /// locations. Environment overrides are applied last.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file cannot be loaded.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        let config = if let Some(path) = path {
            Self::load_from_file(path)?
        } else {
            match std::env::var(CONFIG_PATH_ENV) {
                Ok(env_path) if !env_path.trim().is_empty() => {
                    Self::load_from_file(Path::new(&env_path))?
                },
                _ => Self::load_default(),
            }
        };

        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Applies `BRANCHCTX_*` overrides read through `lookup`.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = non_empty("BRANCHCTX_DATA_DIR") {
            self.data_dir = PathBuf::from(v);
        }
        if let Some(v) = non_empty("BRANCHCTX_REPO_PATH") {
            self.repo_path = PathBuf::from(v);
        }
        if let Some(v) = non_empty("BRANCHCTX_GIT_BINARY") {
            self.git_binary = v;
        }
        if let Some(v) = non_empty("BRANCHCTX_LOG_LEVEL") {
            self.logging.level = Some(v);
        }
        if let Some(v) = non_empty("BRANCHCTX_LOG_FORMAT") {
            self.logging.format = Some(v);
        }
        if let Some(v) = non_empty("BRANCHCTX_LOG_FILE") {
            self.logging.file = Some(PathBuf::from(v));
        }
        self
    }

    /// Converts a `ConfigFile` to `BranchCtxConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(repo_path) = file.repo_path {
            config.repo_path = PathBuf::from(repo_path);
        }
        if let Some(data_dir) = file.data_dir {
            config.data_dir = PathBuf::from(data_dir);
        }
        if let Some(git_binary) = file.git_binary {
            config.git_binary = git_binary;
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = BranchCtxConfig::new();
        assert_eq!(config.data_dir, PathBuf::from(".branch_data"));
        assert_eq!(config.repo_path, PathBuf::from("."));
        assert_eq!(config.git_binary, "git");
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_from_toml() {
        let config = BranchCtxConfig::from_toml_str(
            r#"
            data_dir = "/var/lib/branchctx"
            git_binary = "/opt/git/bin/git"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/branchctx"));
        assert_eq!(config.git_binary, "/opt/git/bin/git");
        assert_eq!(config.repo_path, PathBuf::from("."));
        assert_eq!(config.logging.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = BranchCtxConfig::from_toml_str("data_directory = \"x\"").unwrap_err();
        assert!(err.to_string().contains("parse_config_file"));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = BranchCtxConfig::load_from_file(Path::new("/nonexistent/branchctx.toml"))
            .unwrap_err();
        assert!(err.to_string().contains("read_config_file"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "repo_path = \"/src/app\"\n").unwrap();
        let config = BranchCtxConfig::load_from_file(&path).unwrap();
        assert_eq!(config.repo_path, PathBuf::from("/src/app"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("BRANCHCTX_DATA_DIR", "/data"),
            ("BRANCHCTX_LOG_FORMAT", "json"),
            ("BRANCHCTX_GIT_BINARY", "  "),
        ]);
        let config = BranchCtxConfig::default()
            .with_env_overrides(|key| env.get(key).map(ToString::to_string));
        assert_eq!(config.data_dir, PathBuf::from("/data"));
        assert_eq!(config.logging.format.as_deref(), Some("json"));
        assert_eq!(config.git_binary, "git", "blank values are ignored");
    }
}
