mod blockchain;
mod indexer;
mod pinning;
mod repository;
mod workflow;

pub use blockchain::*;
pub use indexer::*;
pub use pinning::*;
pub use repository::*;
pub use workflow::*;
