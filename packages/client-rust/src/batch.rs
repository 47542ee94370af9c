//! Batch builder: turns a list of records into batch write payloads.
//!
//! Records are chunked by the configured batch size. For actions that address
//! an existing record (see [`Action::requires_object_id`]) every chunk is
//! checked for `objectID` before it is emitted, so no partial batch is built
//! from invalid input.

use serde_json::Value;
use tracing::{debug, warn};

use searchindex_core::{Action, BatchRequest, BatchWriteParams, OBJECT_ID_KEY};

use crate::error::{ConfigError, IndexingError};

/// Wraps each record in a request carrying `action`, preserving order.
#[must_use]
pub fn build_batch(action: Action, records: Vec<Value>) -> BatchWriteParams {
    BatchWriteParams {
        requests: records
            .into_iter()
            .map(|body| BatchRequest::new(action, body))
            .collect(),
    }
}

/// Checks that every record is an object carrying an `objectID`.
///
/// # Errors
///
/// [`IndexingError::NotAnObject`] or [`IndexingError::MissingObjectId`] for the
/// first offending record.
pub fn ensure_object_ids(records: &[Value]) -> Result<(), IndexingError> {
    ensure_object_ids_from(records, 0)
}

fn ensure_object_ids_from(records: &[Value], offset: usize) -> Result<(), IndexingError> {
    for (i, record) in records.iter().enumerate() {
        let position = offset + i;
        let object = record
            .as_object()
            .ok_or(IndexingError::NotAnObject { position })?;
        if object.get(OBJECT_ID_KEY).and_then(scalar_id).is_none() {
            warn!(position, "record is missing objectID");
            return Err(IndexingError::MissingObjectId { position });
        }
    }
    Ok(())
}

/// Renders a usable identifier: strings as-is, numbers stringified.
/// Null, booleans, arrays and objects are not identifiers.
fn scalar_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Copies the attribute `key` of every record into `objectID`.
///
/// Numeric identifiers are stringified. Records where `key` is absent or not
/// a string or number are returned unchanged and fail later if the action
/// needs an id.
///
/// # Errors
///
/// [`IndexingError::NotAnObject`] if a record is not a JSON object.
pub fn map_object_ids(key: &str, records: Vec<Value>) -> Result<Vec<Value>, IndexingError> {
    records
        .into_iter()
        .enumerate()
        .map(|(position, mut record)| {
            let object = record
                .as_object_mut()
                .ok_or(IndexingError::NotAnObject { position })?;
            if let Some(id) = object.get(key).and_then(scalar_id) {
                object.insert(OBJECT_ID_KEY.to_string(), Value::String(id));
            }
            Ok(record)
        })
        .collect()
}

/// Builds the `{ "objectID": id }` bodies used by `deleteObject` requests.
#[must_use]
pub fn delete_requests<I, S>(ids: I) -> Vec<Value>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ids.into_iter()
        .map(|id| {
            let mut body = serde_json::Map::new();
            body.insert(OBJECT_ID_KEY.to_string(), Value::String(id.into()));
            Value::Object(body)
        })
        .collect()
}

/// Splits `records` into batch payloads of at most `batch_size` requests.
///
/// Empty input yields no payloads.
///
/// # Errors
///
/// - [`IndexingError::Config`] when `batch_size` is zero.
/// - [`IndexingError::MissingObjectId`] / [`IndexingError::NotAnObject`] when
///   `action` requires ids and a record lacks one; positions are absolute
///   within `records`.
pub fn split_into_batches(
    action: Action,
    records: Vec<Value>,
    batch_size: usize,
) -> Result<Vec<BatchWriteParams>, IndexingError> {
    if batch_size == 0 {
        return Err(ConfigError::InvalidBatchSize {
            value: batch_size.to_string(),
        }
        .into());
    }

    let mut batches = Vec::with_capacity(records.len().div_ceil(batch_size));
    let mut remaining = records.into_iter().peekable();
    let mut offset = 0;

    while remaining.peek().is_some() {
        let chunk: Vec<Value> = remaining.by_ref().take(batch_size).collect();
        if action.requires_object_id() {
            ensure_object_ids_from(&chunk, offset)?;
        }
        debug!(%action, offset, size = chunk.len(), "built batch");
        offset += chunk.len();
        batches.push(build_batch(action, chunk));
    }

    Ok(batches)
}
