/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised when resolving core identities.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No topic with the given key exists in the catalog.
    #[error("unknown topic: {0}")]
    UnknownTopic(String),

    /// No character with the given key exists in the roster.
    #[error("unknown character: {0}")]
    UnknownCharacter(String),

    /// A topic rule cannot produce valid questions.
    #[error("invalid topic rule: {0}")]
    InvalidRule(String),

    /// The backing key-value store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised by a key-value store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the underlying medium failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be encoded or decoded.
    #[error("store encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// The key cannot be used by this backend.
    #[error("invalid store key: \"{0}\"")]
    InvalidKey(String),
}
