use thiserror::Error;

/// Errors surfaced by the document store and the repository services.
///
/// Services hand these back unchanged; nothing above the store translates
/// them into other variants.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("encode error: {0}")]
    Encode(String),
    #[error("store write rejected: {0}")]
    StoreWrite(String),
    #[error("store error: {0}")]
    Store(String),
    #[error("decode error: {0}")]
    Decode(String),
}

impl ServiceError {
    pub fn not_found(key: &str) -> Self { Self::NotFound(format!("no document at key {key}")) }

    pub fn is_not_found(&self) -> bool { matches!(self, Self::NotFound(_)) }
}
