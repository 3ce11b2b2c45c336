//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod cache;
pub mod drive;
pub mod logging;
pub mod refresh;

use serde::{Deserialize, Serialize};

pub use self::cache::EdgeCacheConfig;
pub use self::drive::{DriveConfig, DriveType, SourceProvider};
pub use self::logging::{LogFormat, LoggingConfig};
pub use self::refresh::RefreshConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Drive scope and listing service settings.
    #[serde(default)]
    pub drive: DriveConfig,
    /// Periodic rebuild settings.
    #[serde(default)]
    pub refresh: RefreshConfig,
    /// Downstream edge cache settings.
    #[serde(default)]
    pub edge_cache: EdgeCacheConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the base configuration file with an environment-specific
    /// overlay, environment variables prefixed with `SHELF`, and finally
    /// the legacy `DRIVE_TYPE` / `DRIVE_ID` / `DRIVE_ORG_NAME` /
    /// `LIST_UPDATE_DELAY` variables.
    pub fn load(path: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SHELF")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let mut config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply the legacy environment variable names on top of the loaded
    /// configuration. `lookup` resolves a variable name to its value.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("DRIVE_TYPE") {
            self.drive.drive_type = value.parse()?;
        }
        if let Some(value) = lookup("DRIVE_ID") {
            self.drive.drive_id = Some(value);
        }
        if let Some(value) = lookup("DRIVE_ORG_NAME") {
            self.drive.org_name = Some(value);
        }
        if let Some(value) = lookup("LIST_UPDATE_DELAY") {
            self.refresh.interval_seconds = value.trim().parse().map_err(|_| {
                AppError::configuration(format!("LIST_UPDATE_DELAY is not a number: '{value}'"))
            })?;
        }
        Ok(())
    }

    /// Check cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        self.drive.validate()?;
        self.edge_cache.validate()?;

        if self.refresh.interval_seconds == 0 {
            return Err(AppError::configuration(
                "refresh.interval_seconds must be greater than zero",
            ));
        }
        Ok(())
    }
}
