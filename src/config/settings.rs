//! TOML-based configuration for reportgen.
//!
//! Supports a config file (reportgen.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [database]
//! path = "${REPORTGEN_DATA}/ledger.sqlite"
//! dialect = "sqlite"
//!
//! [reports]
//! default_page_size = 50
//! max_page_size = 500
//! lookahead = "probe"
//!
//! [identity]
//! user = "$USER"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReportError, ReportResult};
use crate::report::LookAhead;
use crate::sql::Dialect;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "REPORTGEN_CONFIG";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub reports: ReportSettings,
    pub identity: IdentitySettings,
}

/// Where report queries run.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite database file (supports ${ENV_VAR} expansion).
    pub path: Option<String>,

    /// Dialect used when rendering SQL for display.
    pub dialect: Dialect,
}

impl DatabaseSettings {
    /// The database path with environment variables expanded.
    pub fn resolved_path(&self) -> Result<Option<PathBuf>, SettingsError> {
        self.path
            .as_deref()
            .map(|p| expand_env_vars(p).map(PathBuf::from))
            .transpose()
    }
}

/// Paging limits and look-ahead strategy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Page size used when a request does not give one.
    pub default_page_size: u32,

    /// Largest page size a request may ask for.
    pub max_page_size: u32,

    /// How `hasMore` is determined: "next_page" or "probe".
    pub lookahead: LookAhead,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            default_page_size: 50,
            max_page_size: 500,
            lookahead: LookAhead::default(),
        }
    }
}

impl ReportSettings {
    /// The page size to use for a request: `requested`, else the default.
    /// Must lie within `1..=max_page_size`.
    pub fn resolve_page_size(&self, requested: Option<u32>) -> ReportResult<u32> {
        let size = requested.unwrap_or(self.default_page_size);
        if size == 0 || size > self.max_page_size {
            return Err(ReportError::InvalidPageSize {
                size,
                max: self.max_page_size,
            });
        }
        Ok(size)
    }
}

/// Who generated reports are stamped as.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct IdentitySettings {
    /// Fixed user name (supports ${ENV_VAR} expansion).
    pub user: Option<String>,
}

impl IdentitySettings {
    /// The configured user, else the login name from the environment.
    pub fn resolved_user(&self) -> Result<String, SettingsError> {
        match &self.user {
            Some(user) => expand_env_vars(user),
            None => Ok(env::var("USER")
                .or_else(|_| env::var("USERNAME"))
                .unwrap_or_else(|_| "anonymous".to_string())),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `REPORTGEN_CONFIG`
    /// 2. `./reportgen.toml`
    /// 3. `~/.config/reportgen/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var(CONFIG_ENV) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("reportgen.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("reportgen").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Check that the paging limits are consistent.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let reports = &self.reports;
        if reports.max_page_size == 0 {
            return Err(SettingsError::InvalidConfig(
                "reports.max_page_size must be at least 1".to_string(),
            ));
        }
        if reports.default_page_size == 0 || reports.default_page_size > reports.max_page_size {
            return Err(SettingsError::InvalidConfig(format!(
                "reports.default_page_size must be between 1 and {}",
                reports.max_page_size
            )));
        }
        Ok(())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let var_name = if chars.peek() == Some(&'{') {
            chars.next();
            let mut name = String::new();
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                name.push(ch);
            }
            name
        } else {
            let mut name = String::new();
            while let Some(&ch) = chars.peek() {
                if ch.is_alphanumeric() || ch == '_' {
                    name.push(ch);
                    chars.next();
                } else {
                    break;
                }
            }
            if name.is_empty() {
                // Just a lone $, keep it
                result.push('$');
                continue;
            }
            name
        };

        let value = env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
