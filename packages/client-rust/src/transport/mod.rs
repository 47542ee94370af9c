//! [`BatchTransport`](crate::traits::BatchTransport) implementations that ship
//! with the client.

pub mod memory;

pub use memory::{MemoryTransport, RecordedBatch};
