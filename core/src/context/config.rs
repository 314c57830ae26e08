//! Application configuration
//!
//! Re-exports the shared `AppConfig` from salesdash-types and provides
//! persistence through confy (TOML under the user config directory).

use std::path::PathBuf;

use thiserror::Error;

pub use salesdash_types::AppConfig;

use crate::dataset::LoadOptions;

const APP_NAME: &str = "salesdash";
const CONFIG_NAME: &str = "config";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to store configuration")]
    Store(#[source] confy::ConfyError),

    #[error("failed to resolve configuration path")]
    Path(#[source] confy::ConfyError),
}

/// Extension trait for AppConfig persistence
pub trait AppConfigExt {
    fn load() -> Self;
    fn save(&self) -> Result<(), ConfigError>;
    fn config_path() -> Result<PathBuf, ConfigError>;
    fn load_options(&self) -> LoadOptions;
}

impl AppConfigExt for AppConfig {
    /// Load the persisted config, falling back to defaults when it is missing
    /// or unreadable.
    fn load() -> Self {
        match confy::load(APP_NAME, CONFIG_NAME) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load configuration, using defaults");
                Self::default()
            }
        }
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self.clone()).map_err(ConfigError::Store)
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).map_err(ConfigError::Path)
    }

    fn load_options(&self) -> LoadOptions {
        LoadOptions {
            date_format: self.date_format.clone(),
        }
    }
}
