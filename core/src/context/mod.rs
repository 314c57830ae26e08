mod config;
mod interner;

pub use config::{AppConfig, AppConfigExt, ConfigError};
pub use interner::{IStr, intern, interner, lookup, resolve};
