use models::errors::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The only failure the service raises itself; displays the bare message.
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("validation error: {0}")]
    Validation(String),
}

impl ServiceError {
    pub fn parcel_not_found(id: i64) -> Self {
        Self::NotFound(format!("Land Parcel with object ID:{id} not found."))
    }

    pub fn parcel_not_found_for_deletion(id: i64) -> Self {
        Self::NotFound(format!("Land Parcel with object ID:{id} not found for deletion."))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Storage failures surfaced through the model helpers become `Db`, like any
/// other `DbErr`.
impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Db(msg) => Self::Db(msg),
            ModelError::Validation(msg) => Self::Validation(msg),
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Db(e.to_string())
    }
}
