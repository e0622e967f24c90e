//! Settings loading.
//!
//! Settings are layered, later sources winning:
//! 1. built-in defaults
//! 2. `<config_dir>/intransit/config.toml`, if present
//! 3. `INTRANSIT__*` environment variables (e.g. `INTRANSIT__BASE_URL`)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat, Map};
use intransit_domain::ApiSettings;

/// Prefix of environment variables overriding settings.
pub const ENV_PREFIX: &str = "INTRANSIT";

/// Error type for settings loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or merged.
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
}

/// Returns the default settings file path, if the platform has a config directory.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("intransit").join("config.toml"))
}

/// Loads settings from the default file location and the process environment.
///
/// # Errors
///
/// Returns an error if the file exists but is malformed, or a value has the wrong type.
pub fn load_settings() -> Result<ApiSettings, ConfigError> {
    load_settings_from(default_config_path().as_deref(), None)
}

/// Loads settings from an optional file, then environment variables.
///
/// `env` replaces the process environment when given.
///
/// # Errors
///
/// Returns an error if the file exists but is malformed, or a value has the wrong type.
pub fn load_settings_from(
    path: Option<&Path>,
    env: Option<Map<String, String>>,
) -> Result<ApiSettings, ConfigError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
    }
    let settings = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .source(env),
        )
        .build()?
        .try_deserialize()?;

    tracing::debug!(?settings, "settings loaded");
    Ok(settings)
}
