//! Errores de persistencia.
//! Mapea errores de IO / serde a variantes semánticas del almacén.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("analysis not found: {0}")]
    NotFound(String),
    #[error("invalid analysis id: {0:?}")]
    InvalidId(String),
    #[error("corrupt record {path}: {reason}")]
    Corrupt { path: String, reason: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
