//! Recording [`BatchTransport`] implementation.
//!
//! [`MemoryTransport`] keeps every batch it receives and acknowledges it with
//! a fresh task id. Useful for tests and for previewing what an index handle
//! would send without touching the network.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use searchindex_core::{BatchResponse, BatchWriteParams, OBJECT_ID_KEY};

use crate::traits::BatchTransport;

/// One batch call captured by [`MemoryTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedBatch {
    pub index_name: String,
    pub params: BatchWriteParams,
}

/// In-memory transport that records batches instead of sending them.
///
/// Task ids start at 1 and increase per call. Records without an `objectID`
/// (as sent by `addObject`) are acknowledged with a generated `auto-<n>` id.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    batches: Mutex<Vec<RecordedBatch>>,
    next_task_id: AtomicI64,
    next_generated_id: AtomicI64,
}

impl MemoryTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every batch received so far, in call order.
    #[must_use]
    pub fn batches(&self) -> Vec<RecordedBatch> {
        self.batches.lock().clone()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.batches.lock().len()
    }
}

#[async_trait]
impl BatchTransport for MemoryTransport {
    async fn write_batch(
        &self,
        index_name: &str,
        params: &BatchWriteParams,
    ) -> anyhow::Result<BatchResponse> {
        let task_id = self.next_task_id.fetch_add(1, Ordering::Relaxed) + 1;
        let object_ids = params
            .requests
            .iter()
            .filter(|r| !r.action.is_index_level())
            .map(|r| match r.body.get(OBJECT_ID_KEY) {
                Some(serde_json::Value::String(id)) => id.clone(),
                Some(other) => other.to_string(),
                None => {
                    let n = self.next_generated_id.fetch_add(1, Ordering::Relaxed) + 1;
                    format!("auto-{n}")
                }
            })
            .collect();

        self.batches.lock().push(RecordedBatch {
            index_name: index_name.to_string(),
            params: params.clone(),
        });

        Ok(BatchResponse {
            task_id,
            object_ids,
        })
    }
}
