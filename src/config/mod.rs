//! Configuration module for reportgen.
//!
//! Handles the config file, environment variables and paging limits.

mod settings;

pub use settings::{
    expand_env_vars, DatabaseSettings, IdentitySettings, ReportSettings, Settings, SettingsError,
    CONFIG_ENV,
};
