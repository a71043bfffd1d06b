use thiserror::Error;

/// Errors surfaced by [`crate::DocumentStore`] implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("failed to decode document {id}: {source}")]
    Decode {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("store unavailable: {message}")]
    Unavailable { message: String },

    #[error("write rejected for {collection}/{id}: {reason}")]
    Rejected {
        collection: String,
        id: String,
        reason: String,
    },

    #[error("invalid seed for collection '{collection}': {reason}")]
    InvalidSeed { collection: String, reason: String },

    #[error("seed I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("seed format error: {0}")]
    SeedFormat(#[from] serde_json::Error),
}

impl StoreError {
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable { message: message.into() }
    }

    pub fn rejected(collection: impl Into<String>, id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            collection: collection.into(),
            id: id.into(),
            reason: reason.into(),
        }
    }
}
