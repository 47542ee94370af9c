//! Index handle that chooses the batch action for each write and sends the
//! resulting payloads through a [`BatchTransport`].

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use searchindex_core::{Action, BatchRequest, BatchResponse, BatchWriteParams};

use crate::batch::{delete_requests, map_object_ids, split_into_batches};
use crate::config::IndexingConfig;
use crate::error::IndexingError;
use crate::traits::BatchTransport;

/// Options for [`SearchIndex::save_objects`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveOptions {
    /// Send records as `addObject` and let the engine assign ids.
    pub auto_generate_object_id: bool,
    /// Attribute to copy into `objectID` before sending.
    pub object_id_key: Option<String>,
}

/// Aggregated acknowledgements of one logical write.
///
/// Empty when the write had nothing to send.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub responses: Vec<BatchResponse>,
}

impl BatchOutcome {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Task ids in call order.
    #[must_use]
    pub fn task_ids(&self) -> Vec<i64> {
        self.responses.iter().map(|r| r.task_id).collect()
    }

    /// Every affected object id, across all calls, in request order.
    #[must_use]
    pub fn object_ids(&self) -> Vec<&str> {
        self.responses
            .iter()
            .flat_map(|r| r.object_ids.iter().map(String::as_str))
            .collect()
    }
}

/// Write handle bound to a single index.
pub struct SearchIndex {
    name: String,
    config: IndexingConfig,
    transport: Arc<dyn BatchTransport>,
}

impl SearchIndex {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        config: IndexingConfig,
        transport: Arc<dyn BatchTransport>,
    ) -> Self {
        Self {
            name: name.into(),
            config,
            transport,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configuration this handle was built with, including the credentials
    /// a signing transport needs.
    #[must_use]
    pub fn config(&self) -> &IndexingConfig {
        &self.config
    }

    /// Adds or replaces one record.
    ///
    /// # Errors
    ///
    /// See [`SearchIndex::save_objects`].
    pub async fn save_object(
        &self,
        record: Value,
        options: SaveOptions,
    ) -> Result<BatchOutcome, IndexingError> {
        self.save_objects(vec![record], options).await
    }

    /// Adds or replaces records, in batches of `config.batch_size`.
    ///
    /// Records are sent as `updateObject` and must carry `objectID`, unless
    /// `auto_generate_object_id` is set, in which case they are sent as
    /// `addObject` unchecked.
    ///
    /// # Errors
    ///
    /// [`IndexingError::MissingObjectId`] before anything is sent for the
    /// offending chunk; [`IndexingError::Transport`] from the transport.
    pub async fn save_objects(
        &self,
        records: Vec<Value>,
        options: SaveOptions,
    ) -> Result<BatchOutcome, IndexingError> {
        if options.auto_generate_object_id {
            return self.write_records(Action::AddObject, records).await;
        }
        let records = match options.object_id_key.as_deref() {
            Some(key) => map_object_ids(key, records)?,
            None => records,
        };
        self.write_records(Action::UpdateObject, records).await
    }

    /// Merges attributes into existing records.
    ///
    /// Uses `partialUpdateObject` when `create_if_not_exists` is set, otherwise
    /// `partialUpdateObjectNoCreate` so missing records are skipped.
    ///
    /// # Errors
    ///
    /// Same as [`SearchIndex::save_objects`].
    pub async fn partial_update_objects(
        &self,
        records: Vec<Value>,
        create_if_not_exists: bool,
    ) -> Result<BatchOutcome, IndexingError> {
        let action = if create_if_not_exists {
            Action::PartialUpdateObject
        } else {
            Action::PartialUpdateObjectNoCreate
        };
        self.write_records(action, records).await
    }

    /// Merges attributes into one record.
    ///
    /// # Errors
    ///
    /// Same as [`SearchIndex::save_objects`].
    pub async fn partial_update_object(
        &self,
        record: Value,
        create_if_not_exists: bool,
    ) -> Result<BatchOutcome, IndexingError> {
        self.partial_update_objects(vec![record], create_if_not_exists)
            .await
    }

    /// Removes records by id.
    ///
    /// # Errors
    ///
    /// [`IndexingError::Transport`] from the transport.
    pub async fn delete_objects<I, S>(&self, ids: I) -> Result<BatchOutcome, IndexingError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.write_records(Action::DeleteObject, delete_requests(ids))
            .await
    }

    /// Removes one record by id.
    ///
    /// # Errors
    ///
    /// [`IndexingError::Transport`] from the transport.
    pub async fn delete_object(&self, id: impl Into<String>) -> Result<BatchOutcome, IndexingError> {
        self.delete_objects([id.into()]).await
    }

    /// Removes every record, keeping the index settings.
    ///
    /// # Errors
    ///
    /// [`IndexingError::Transport`] from the transport.
    pub async fn clear_objects(&self) -> Result<BatchOutcome, IndexingError> {
        self.batch(vec![BatchRequest::index_level(Action::Clear)])
            .await
    }

    /// Deletes the index itself.
    ///
    /// # Errors
    ///
    /// [`IndexingError::Transport`] from the transport.
    pub async fn delete(&self) -> Result<BatchOutcome, IndexingError> {
        self.batch(vec![BatchRequest::index_level(Action::Delete)])
            .await
    }

    /// Sends caller-built requests as a single call, without chunking or
    /// id checks.
    ///
    /// # Errors
    ///
    /// [`IndexingError::Transport`] from the transport.
    pub async fn batch(&self, requests: Vec<BatchRequest>) -> Result<BatchOutcome, IndexingError> {
        if requests.is_empty() {
            return Ok(BatchOutcome::default());
        }
        info!(index = %self.name, requests = requests.len(), "sending raw batch");
        let response = self
            .transport
            .write_batch(&self.name, &BatchWriteParams { requests })
            .await?;
        Ok(BatchOutcome {
            responses: vec![response],
        })
    }

    async fn write_records(
        &self,
        action: Action,
        records: Vec<Value>,
    ) -> Result<BatchOutcome, IndexingError> {
        info!(index = %self.name, %action, records = records.len(), "writing records");
        let batches = split_into_batches(action, records, self.config.batch_size)?;

        let mut outcome = BatchOutcome::default();
        for params in &batches {
            let response = self.transport.write_batch(&self.name, params).await?;
            outcome.responses.push(response);
        }
        Ok(outcome)
    }
}
