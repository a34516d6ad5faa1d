use thiserror::Error;

#[derive(Error, Debug)]
pub enum TypemineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("MSGPACK encode error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
    #[error("MSGPACK decode error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
    #[error("Zstd error: {0}")]
    Compression(String),
    #[error("Parsing error: {0}")]
    Parsing(String),
    #[error("Index version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<rayon::ThreadPoolBuildError> for TypemineError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        TypemineError::Internal(format!("thread pool: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, TypemineError>;
