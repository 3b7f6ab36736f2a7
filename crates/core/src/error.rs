#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("failed to read record store: {0}")]
    StoreRead(std::io::Error),
    #[error("failed to write record store: {0}")]
    StoreWrite(std::io::Error),
    #[error("failed to serialize record store: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize record store: {0}")]
    Deserialization(serde_json::Error),
    #[error("failed to allocate a unique patient id after {0} attempts")]
    IdAllocation(usize),
    #[error("record store lock poisoned")]
    StorePoisoned,
}

impl CoreError {
    /// True for errors caused by the caller's input rather than by the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidArgument(_) | CoreError::InvalidInput(_)
        )
    }
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
