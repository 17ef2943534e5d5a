use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no record for {0}")]
    NotFound(String),

    #[error("record already present for {0}")]
    Duplicate(String),

    #[error("arithmetic overflow: {0}")]
    Overflow(String),

    #[error("identifier space exhausted")]
    Exhausted,

    #[error("backend failure: {0}")]
    Backend(String),
}
