use thiserror::Error;

#[derive(Error, Debug)]
pub enum PinningError {
    /// The file was rejected before any upload.
    #[error("{0}")]
    Validation(String),

    #[error("PQ_PINATA_JWT environment variable is required")]
    MissingJwt,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Pinning service error (status {status}): {message}")]
    Service { status: u16, message: String },

    #[error("Invalid pinning service response: {reason}")]
    InvalidResponse { reason: String },

    #[error("Content {cid} unavailable on all {attempts} gateway(s)")]
    AllGatewaysFailed { cid: String, attempts: usize },
}

pub type Result<T> = std::result::Result<T, PinningError>;
