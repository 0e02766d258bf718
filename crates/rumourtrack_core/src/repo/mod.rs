//! Repository layer over the flat-file record stores.
//!
//! # Responsibility
//! - Provide per-entity data access APIs on top of [`json_store::JsonStore`].
//! - Keep file and JSON transport details out of rule and session code.
//!
//! # Invariants
//! - Reads answer a missing id with `None`; writes answer it with
//!   [`RepoError::NotFound`].
//! - Every write is persisted before it becomes observable in memory.

pub mod json_store;
pub mod report_repo;
pub mod rumour_repo;
pub mod user_repo;

use crate::repo::json_store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record persistence and lookup operations.
#[derive(Debug)]
pub enum RepoError {
    /// The underlying file store failed.
    Store(StoreError),
    /// A write targeted an id that does not exist.
    NotFound { entity: &'static str, id: String },
}

impl RepoError {
    pub(crate) fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
