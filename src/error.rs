use crate::validation::ValidationErrors;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Employee not found: {0}")]
    NotFound(Uuid),

    #[error("Validation failed: {0}")]
    Invalid(ValidationErrors),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, RosterError>;
