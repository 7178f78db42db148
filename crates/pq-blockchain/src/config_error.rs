#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing secret: {0}")]
    MissingSecret(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
