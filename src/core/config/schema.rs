//! core::config::schema
//!
//! Configuration schema types.
//!
//! The same schema is used for the global file and the repository file;
//! values in the repository file take precedence.
//!
//! # Validation
//!
//! Config values are validated after parsing (e.g., the timeout must be
//! positive and at most a day, the git program cannot be empty).

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Largest accepted `timeout_secs` (one day).
pub const MAX_TIMEOUT_SECS: u64 = 24 * 60 * 60;

/// Contents of a single configuration file.
///
/// # Example
///
/// ```toml
/// git_program = "/usr/local/bin/git"
/// timeout_secs = 120
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Path or name of the git executable
    pub git_program: Option<String>,

    /// Default per-invocation timeout, in seconds
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(program) = &self.git_program {
            if program.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "git_program cannot be empty".to_string(),
                ));
            }
        }

        match self.timeout_secs {
            Some(0) => {
                return Err(ConfigError::InvalidValue(
                    "timeout_secs must be greater than zero".to_string(),
                ));
            }
            Some(secs) if secs > MAX_TIMEOUT_SECS => {
                return Err(ConfigError::InvalidValue(format!(
                    "timeout_secs must be at most {MAX_TIMEOUT_SECS}"
                )));
            }
            _ => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ConfigFile::default();
        assert!(config.git_program.is_none());
        assert!(config.timeout_secs.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = ConfigFile {
            timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn oversized_timeout_rejected() {
        let config: ConfigFile = toml::from_str("timeout_secs = 18446744073709551615").unwrap();
        assert!(config.validate().is_err());

        let config = ConfigFile {
            timeout_secs: Some(MAX_TIMEOUT_SECS),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn blank_program_rejected() {
        let config = ConfigFile {
            git_program: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn roundtrip() {
        let config = ConfigFile {
            git_program: Some("git".to_string()),
            timeout_secs: Some(30),
        };

        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: ConfigFile = toml::from_str(&toml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn reject_unknown_fields() {
        let toml = r#"
            timeout_secs = 10
            unknown_field = true
        "#;

        let result: Result<ConfigFile, _> = toml::from_str(toml);
        assert!(result.is_err());
    }
}
