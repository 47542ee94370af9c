//! Search indexing client: batch builder, index write handle, and the
//! transport seam an HTTP layer plugs into.

pub mod batch;
pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod traits;
pub mod transport;

pub use config::IndexingConfig;
pub use error::{ConfigError, IndexingError};
pub use index::{BatchOutcome, SaveOptions, SearchIndex};
pub use traits::BatchTransport;
pub use transport::MemoryTransport;

pub use searchindex_core::{Action, BatchRequest, BatchResponse, BatchWriteParams};
