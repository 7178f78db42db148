use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] Box<figment::Error>),

    #[error("Missing required secret: {0}")]
    MissingSecret(String),

    #[error("Missing required config file: {0}")]
    MissingConfig(String),

    #[error("Missing required environment setting: {0}")]
    MissingEnvironment(String),

    #[error("Unknown environment: {0}")]
    UnknownEnvironment(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<pq_blockchain::ConfigError> for ConfigError {
    fn from(error: pq_blockchain::ConfigError) -> Self {
        match error {
            pq_blockchain::ConfigError::MissingSecret(secret) => Self::MissingSecret(secret),
            pq_blockchain::ConfigError::InvalidConfig(reason) => {
                Self::InvalidConfig(format!("managers.blockchain: {reason}"))
            }
        }
    }
}

impl From<pq_repository::ConfigError> for ConfigError {
    fn from(error: pq_repository::ConfigError) -> Self {
        match error {
            pq_repository::ConfigError::MissingSecret(secret) => Self::MissingSecret(secret),
            pq_repository::ConfigError::InvalidConfig(reason) => {
                Self::InvalidConfig(format!("managers.repository: {reason}"))
            }
        }
    }
}

impl From<pq_pinning::ConfigError> for ConfigError {
    fn from(error: pq_pinning::ConfigError) -> Self {
        match error {
            pq_pinning::ConfigError::InvalidConfig(reason) => Self::InvalidConfig(reason),
        }
    }
}
