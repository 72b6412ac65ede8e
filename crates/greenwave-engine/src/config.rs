//! Application configuration
//!
//! Layered with the `config` crate: an optional TOML file, then environment
//! variables prefixed `GREENWAVE` with `__` separating nested keys.
//!
//! - `GREENWAVE__STORE__DATA_DIR=/var/lib/greenwave` -> `store.data_dir`
//! - `GREENWAVE__LOGGING__PROFILE=production` -> `logging.profile`
//! - `GREENWAVE__ADMIN__PASSWORD=...` -> `admin.password`
//!
//! Every section is optional and falls back to its defaults.

use greenwave_core::errors::{ExError, ExErrorKind};
use greenwave_core::logging_facility::Profile;
use greenwave_core_types::Sensitive;
use greenwave_store::StoreConfig;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "GREENWAVE";

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for ExError {
    fn from(err: ConfigError) -> Self {
        ExError::new(ExErrorKind::Config)
            .with_op("load_config")
            .with_message(err.to_string())
    }
}

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GreenWaveConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub profile: Profile,
}

/// Bootstrap administrator provisioned at startup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub name: String,
    pub email: String,
    pub password: Sensitive<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            name: "Administrator".to_string(),
            email: "admin@greenwave".to_string(),
            password: Sensitive::from("adminpass"),
        }
    }
}

impl GreenWaveConfig {
    /// Load configuration from an optional TOML file plus the environment
    ///
    /// An explicit `path` must exist; without one only the environment and
    /// defaults apply.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing or malformed, a value
    /// cannot be parsed into its field, or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        let config: GreenWaveConfig = builder
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Semantic checks the type system cannot express
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("store.data_dir is empty".to_string()));
        }
        if !self.admin.email.contains('@') {
            return Err(ConfigError::Invalid(format!(
                "admin.email is not an email address: {}",
                self.admin.email
            )));
        }
        if self.admin.password.is_blank() {
            return Err(ConfigError::Invalid("admin.password is blank".to_string()));
        }
        Ok(())
    }
}
