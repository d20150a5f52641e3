use thiserror::Error;

/// Errors from sorted-set store operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Cannot connect to store at {url}: {message}")]
    Connection { url: String, message: String },

    #[error("Invalid store URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Store command failed: {0}")]
    Command(String),
}

impl StoreError {
    /// True when the store could not be reached at all
    pub fn is_connection(&self) -> bool {
        matches!(self, StoreError::Connection { .. })
    }
}

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;
