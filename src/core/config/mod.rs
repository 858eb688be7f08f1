//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! gitrev has two configuration scopes:
//! - **Global**: User-level settings
//! - **Repo**: Repository-level overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$GITREV_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/gitrev/config.toml`
//! 3. `~/.gitrev/config.toml`
//!
//! # Repo Config Location
//!
//! `.git/gitrev/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use gitrev::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/repo"))).unwrap();
//! let config = result.config;
//!
//! println!("git: {}", config.git_program());
//! println!("timeout: {:?}", config.timeout());
//! ```

pub mod schema;

pub use schema::ConfigFile;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Default timeout for a single git invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default git executable.
pub const DEFAULT_GIT_PROGRAM: &str = "git";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence rules automatically. Repo config overrides
/// global config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: ConfigFile,
    /// Repository configuration (if in a repo)
    pub repo: Option<ConfigFile>,
    global_path: Option<PathBuf>,
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `repo_path` is provided, also loads repo-specific config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed.
    /// Missing config files are not an error (defaults are used).
    pub fn load(repo_path: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        Self::load_from(Self::find_global(), repo_path)
    }

    /// Load configuration from an explicit global file and repository.
    pub fn load_from(
        global_file: Option<PathBuf>,
        repo_path: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let global = match &global_file {
            Some(path) => Self::read_config(path)?,
            None => ConfigFile::default(),
        };

        let (repo, repo_file) = match repo_path {
            Some(path) => {
                let candidate = Self::repo_config_path(path);
                if candidate.is_file() {
                    (Some(Self::read_config(&candidate)?), Some(candidate))
                } else {
                    (None, None)
                }
            }
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                repo,
                global_path: global_file,
                repo_path: repo_file,
            },
        })
    }

    /// Find the global config file, if any exists.
    fn find_global() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("GITREV_CONFIG") {
            let path = PathBuf::from(path);
            if path.is_file() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("gitrev/config.toml");
            if path.is_file() {
                return Some(path);
            }
        }

        dirs::home_dir()
            .map(|home| home.join(".gitrev/config.toml"))
            .filter(|path| path.is_file())
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<ConfigFile, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the canonical path for repo config.
    ///
    /// Returns `.git/gitrev/config.toml` relative to the given repo path.
    pub fn repo_config_path(repo_path: &Path) -> PathBuf {
        repo_path.join(".git/gitrev/config.toml")
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Get the git executable.
    ///
    /// Defaults to `git` if not configured.
    pub fn git_program(&self) -> &str {
        self.repo
            .as_ref()
            .and_then(|r| r.git_program.as_deref())
            .or(self.global.git_program.as_deref())
            .unwrap_or(DEFAULT_GIT_PROGRAM)
    }

    /// Get the default per-invocation timeout.
    ///
    /// Defaults to [`DEFAULT_TIMEOUT`] if not configured.
    pub fn timeout(&self) -> Duration {
        self.repo
            .as_ref()
            .and_then(|r| r.timeout_secs)
            .or(self.global.timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_repo_config(dir: &Path, contents: &str) -> PathBuf {
        let path = Config::repo_config_path(dir);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn load_empty_defaults() {
        let result = Config::load_from(None, None).unwrap();
        let config = result.config;

        assert_eq!(config.git_program(), "git");
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert!(config.global_config_loaded_from().is_none());
        assert!(config.repo_config_loaded_from().is_none());
    }

    #[test]
    fn load_global_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "timeout_secs = 5\n").unwrap();

        let config = Config::load_from(Some(path.clone()), None).unwrap().config;

        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.global_config_loaded_from(), Some(path.as_path()));
    }

    #[test]
    fn load_repo_config() {
        let temp = TempDir::new().unwrap();
        let path = write_repo_config(temp.path(), "git_program = \"/opt/git/bin/git\"\n");

        let config = Config::load_from(None, Some(temp.path())).unwrap().config;

        assert_eq!(config.git_program(), "/opt/git/bin/git");
        assert_eq!(config.repo_config_loaded_from(), Some(path.as_path()));
    }

    #[test]
    fn missing_repo_config_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(None, Some(temp.path())).unwrap().config;
        assert!(config.repo.is_none());
    }

    #[test]
    fn precedence_repo_overrides_global() {
        let temp = TempDir::new().unwrap();
        let global = temp.path().join("global.toml");
        fs::write(&global, "timeout_secs = 5\ngit_program = \"git-global\"\n").unwrap();
        write_repo_config(temp.path(), "timeout_secs = 9\n");

        let config = Config::load_from(Some(global), Some(temp.path()))
            .unwrap()
            .config;

        assert_eq!(config.timeout(), Duration::from_secs(9));
        // Not set in the repo file, so the global value shows through.
        assert_eq!(config.git_program(), "git-global");
    }

    #[test]
    fn invalid_value_rejected() {
        let temp = TempDir::new().unwrap();
        write_repo_config(temp.path(), "timeout_secs = 0\n");

        let result = Config::load_from(None, Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn unparsable_file_rejected() {
        let temp = TempDir::new().unwrap();
        write_repo_config(temp.path(), "timeout_secs = \"soon\"\n");

        let result = Config::load_from(None, Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }
}
