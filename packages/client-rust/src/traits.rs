use async_trait::async_trait;
use searchindex_core::{BatchResponse, BatchWriteParams};

/// Sends batch write payloads to the indexing engine.
/// Implementations: HTTP client (external), in-memory recorder (tests, dry runs).
#[async_trait]
pub trait BatchTransport: Send + Sync {
    /// Perform one batch write call against `index_name`.
    async fn write_batch(
        &self,
        index_name: &str,
        params: &BatchWriteParams,
    ) -> anyhow::Result<BatchResponse>;
}
