mod config;
mod config_error;
mod error;
mod file_store;
mod gateway;
mod pinata;
mod validation;

pub use config::{DEFAULT_UPLOAD_URL, PinningConfig, PinningConfigRaw};
pub use config_error::ConfigError;
pub use error::{PinningError, Result};
pub use file_store::{FileStore, UploadOptions, UploadedFile};
pub use gateway::{PUBLIC_GATEWAYS, gateway_urls, ipfs_url};
pub use pinata::PinataClient;
pub use validation::{FileRules, PhotoFile, validate_file};
