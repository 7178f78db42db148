mod defaults;
mod error;
mod loader;
mod raw;

pub(crate) use error::ConfigError;
pub(crate) use loader::{initialize_configuration, is_dev_env};
pub(crate) use raw::{Config, ConfigRaw};
