/// All errors a `DocumentStore` implementation can return.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No document with the given id in the collection.
    #[error("{collection} record not found: {id}")]
    NotFound {
        collection: &'static str,
        id: String,
    },

    /// A unique field collided with an existing document.
    #[error("duplicate {field} in {collection}: {value}")]
    Duplicate {
        collection: &'static str,
        field: &'static str,
        value: String,
    },

    /// Document encode/decode failure.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// Backend-specific failure (connection, I/O, SQL).
    #[error("storage backend error: {0}")]
    Backend(String),
}
