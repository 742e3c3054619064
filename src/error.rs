//! Crate-level error type

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::db::DbError;
use crate::nutrition::GroceryError;
use crate::remote::RemoteError;
use crate::store::StoreError;
use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Database(#[from] DbError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Grocery(#[from] GroceryError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),
}

impl AppError {
    pub fn not_found(what: impl Into<String>) -> Self {
        AppError::NotFound(what.into())
    }

    /// Errors a user can fix by changing their input
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::NotFound(_)
                | AppError::InvalidInput(_)
                | AppError::Remote(RemoteError::InvalidInviteCode)
                | AppError::Remote(RemoteError::Validation(_))
                | AppError::Store(StoreError::Validation(_))
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
