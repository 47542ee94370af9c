use searchindex_core::UnrecognizedAction;

/// Invalid client configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid batch size '{value}': must be a positive integer")]
    InvalidBatchSize { value: String },
}

/// Errors returned by batch building and index operations.
#[derive(Debug, thiserror::Error)]
pub enum IndexingError {
    #[error(
        "record at position {position} has no objectID; all objects must have an unique \
         objectID (like a primary key) to be valid. Map an existing identifier with \
         `object_id_key`, or let the engine generate ids with `auto_generate_object_id` \
         (not recommended)"
    )]
    MissingObjectId { position: usize },
    #[error("record at position {position} is not a JSON object")]
    NotAnObject { position: usize },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    UnrecognizedAction(#[from] UnrecognizedAction),
    #[error("transport error: {0}")]
    Transport(#[from] anyhow::Error),
}
