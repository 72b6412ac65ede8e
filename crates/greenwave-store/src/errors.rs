//! Error handling for greenwave-store
//!
//! Wraps greenwave-core ExError with store-specific helpers

use greenwave_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a serialization error for a collection file
pub fn serialization_error(collection: &str, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op("collection_codec")
        .with_entity_id(collection.to_string())
        .with_message(err.to_string())
}

/// Create a duplicate-id error for append-only collections
pub fn duplicate_id(collection: &str, id: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op(format!("add_{}", collection))
        .with_entity_id(id.to_string())
        .with_message(format!("{} already contains id {}", collection, id))
}
