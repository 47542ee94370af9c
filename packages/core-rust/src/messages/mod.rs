//! Wire-compatible message schemas for the batch indexing endpoint.
//!
//! All types serialize to JSON objects whose keys match the indexing API
//! exactly. Actions are encoded through the [`Action`](crate::Action) codec,
//! so an unknown or non-string action fails the whole decode.

pub mod batch;

pub use batch::{BatchRequest, BatchResponse, BatchWriteParams, OBJECT_ID_KEY};
