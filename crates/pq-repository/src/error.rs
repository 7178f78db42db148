use thiserror::Error;

/// Error types for repository/database operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database error - wraps all SeaORM errors
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    /// Record not found error
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A stored column could not be decoded back into its domain type.
    #[error("Invalid stored value in {column}: {value}")]
    InvalidValue { column: &'static str, value: String },

    /// A value cannot be represented in its column (e.g. u64 above i64::MAX).
    #[error("Value out of range for {column}: {value}")]
    OutOfRange { column: &'static str, value: String },
}

/// Convenient Result type alias for RepositoryError
pub type Result<T> = std::result::Result<T, RepositoryError>;
