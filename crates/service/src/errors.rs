use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    /// A snapshot file exists but cannot be parsed; the store must not start.
    #[error("snapshot decode error: {0}")]
    Decode(String),
    #[error("snapshot encode error: {0}")]
    Encode(String),
    /// Reading or rewriting a snapshot failed. For mutations the in-memory
    /// change has already been applied and stays visible.
    #[error("persist error: {0}")]
    Persist(String),
    #[error("hashing error: {0}")]
    Hash(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn is_not_found(&self) -> bool { matches!(self, Self::NotFound(_)) }
}
