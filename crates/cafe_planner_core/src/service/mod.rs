//! Use-case services over the planner store.
//!
//! # Responsibility
//! - Orchestrate repositories and pure board rules into UI-level operations.
//! - Keep callers (FFI, CLI) decoupled from SQL and rule details.
//!
//! # Invariants
//! - Services never bypass repository validation.
//! - Destructive operations require an explicit `Confirmation::Confirmed`.
//! - Time is always passed in (`now_ms`); services never read the clock.

pub mod category_service;
pub mod data_service;
pub mod note_service;
pub mod task_service;

use crate::board::drag::DragError;
use crate::model::ModelValidationError;
use crate::repo::RepoError;
use crate::transfer::{ImportError, TransferError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// User decision captured by the confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl Confirmation {
    pub fn from_flag(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::Declined
        }
    }
}

/// Error surfaced by service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Input failed model validation.
    Validation(ModelValidationError),
    /// Target record does not exist.
    NotFound {
        collection: &'static str,
        id: Uuid,
    },
    Drag(DragError),
    Transfer(TransferError),
    Import(ImportError),
    /// Destructive operation was not confirmed; nothing changed.
    ConfirmationRequired(&'static str),
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { collection, id } => write!(f, "{collection} record not found: {id}"),
            Self::Drag(err) => write!(f, "{err}"),
            Self::Transfer(err) => write!(f, "{err}"),
            Self::Import(err) => write!(f, "{err}"),
            Self::ConfirmationRequired(operation) => {
                write!(f, "{operation} requires explicit confirmation")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Drag(err) => Some(err),
            Self::Transfer(err) => Some(err),
            Self::Import(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::NotFound { .. } | Self::ConfirmationRequired(_) => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { collection, id } => Self::NotFound { collection, id },
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<ModelValidationError> for ServiceError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DragError> for ServiceError {
    fn from(value: DragError) -> Self {
        Self::Drag(value)
    }
}

impl From<TransferError> for ServiceError {
    fn from(value: TransferError) -> Self {
        Self::Transfer(value)
    }
}

impl From<ImportError> for ServiceError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}
