use thiserror::Error;

/// Top-level application error that composes all subsystem errors
#[derive(Error, Debug)]
pub(crate) enum NodeError {
    #[error("Blockchain error: {0}")]
    Blockchain(#[from] pq_blockchain::BlockchainError),

    #[error("Repository error: {0}")]
    Repository(#[from] pq_repository::RepositoryError),

    #[error("Event mapping error: {0}")]
    Mapping(#[from] crate::indexer::MapError),

    #[error("Pinning error: {0}")]
    Pinning(#[from] pq_pinning::PinningError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
