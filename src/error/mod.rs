pub mod message;

use sea_orm::DbErr;

#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    NotUpdated(String),
    #[error("{0}")]
    NotDeleted(String),
    #[error("{0}")]
    NotSaved(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("mapping error: {0}")]
    Mapping(String),
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl ServiceError {
    pub fn not_found(msg: &str, value: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{}{}", msg, value))
    }

    pub fn not_updated(msg: &str, value: impl std::fmt::Display) -> Self {
        Self::NotUpdated(format!("{}{}", msg, value))
    }

    pub fn not_deleted(msg: &str, value: impl std::fmt::Display) -> Self {
        Self::NotDeleted(format!("{}{}", msg, value))
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
