pub mod catalogue_service;
pub mod state_service;
pub mod status_service;

use thiserror::Error;

use crate::database::StoreError;

pub use catalogue_service::CatalogueService;
pub use state_service::{Ensured, StateService};
pub use status_service::StatusService;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Inconsistent(String),
    #[error("Builtin catalogue is malformed: {0}")]
    InvalidSeed(#[from] serde_yaml::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub fn unknown_slug() -> Self {
        ServiceError::NotFound("Unknown branch slug".to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Postgres text cannot hold NUL, so every backend refuses it
pub(crate) fn ensure_storable(field: &str, value: &str) -> ServiceResult<()> {
    if value.contains('\0') {
        return Err(ServiceError::InvalidInput(format!(
            "{} must not contain NUL characters",
            field
        )));
    }
    Ok(())
}
