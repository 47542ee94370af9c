//! Search indexing core: the batch action vocabulary and batch wire messages.

pub mod action;
pub mod messages;

pub use action::{Action, UnrecognizedAction};
pub use messages::{BatchRequest, BatchResponse, BatchWriteParams, OBJECT_ID_KEY};

#[cfg(test)]
mod tests {
    #[test]
    fn crate_loads() {
        // Empty body: if this test runs, the crate compiles and loads.
    }
}
